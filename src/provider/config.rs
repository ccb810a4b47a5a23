//! Configuration for provider connections.
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{Result, ScoutError};

/// Default GitHub REST and GraphQL API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Connection settings for the GitHub provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API root, e.g. `https://api.github.com` or
    /// `https://ghe.example.com/api/v3` for Enterprise.
    pub api_url: String,
    /// Personal access token. Anonymous requests are used when absent.
    pub token: Option<SecretString>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl ProviderConfig {
    /// Build provider settings from a raw API URL and an optional token.
    /// Empty tokens are treated as absent.
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let parsed = Url::parse(api_url)?;

        match parsed.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(ScoutError::invalid_args(
                    "only http and https schemes are supported for api urls",
                ));
            }
        }

        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        Ok(Self {
            api_url: api_url.to_string(),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }

    /// API root without a trailing slash.
    pub fn base_uri(&self) -> String {
        self.api_url.trim_end_matches('/').to_string()
    }
}
