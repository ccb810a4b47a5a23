//! Custom error types for octoscout.

use thiserror::Error;

/// Main error type for octoscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Provider/API errors
    #[error("Provider request failed: {0}")]
    ProviderError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    /// Elapsed timeout in milliseconds.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    // Parsing and decoding errors - automatic conversions via #[from]
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ScoutError
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Create a provider error with context
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::ProviderError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ScoutError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code.as_u16() == 401
                    || source.status_code.as_u16() == 403 =>
            {
                Self::AuthenticationError(source.message.clone())
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code.as_u16() == 404 =>
            {
                Self::NotFound(source.message.clone())
            }
            _ => Self::ProviderError(format!("GitHub API error: {}", err)),
        }
    }
}
