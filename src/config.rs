//! Configuration loading and parsing for `octoscout.toml` files.
//!
//! Every field has a default so an absent file, or a file that only sets a
//! handful of keys, yields a usable configuration.
use log::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::error::{Result, ScoutError};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "octoscout.toml";
/// Dependency manifest inspected for framework detection.
pub const DEFAULT_MANIFEST_PATH: &str = "package.json";
/// Number of repositories per user considered by the aggregations.
pub const DEFAULT_REPOSITORY_CAP: usize = 20;
/// Page size used when listing a user's public repositories.
pub const DEFAULT_REPOSITORY_PAGE_SIZE: u8 = 100;
/// Upper bound accepted by the GitHub REST API for `per_page`.
pub const MAX_REPOSITORY_PAGE_SIZE: u8 = 100;
/// Per provider call timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Known web framework identifiers matched against manifest dependencies.
pub const DEFAULT_FRAMEWORKS: [&str; 7] =
    ["react", "next", "vue", "angular", "express", "nestjs", "svelte"];

/// Defaults for the profile search subcommand.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// GitHub `location:` qualifier.
    pub location: String,
    /// Users must have strictly more followers than this.
    pub min_followers: u64,
    /// Number of users requested from the search API.
    pub result_limit: u32,
    /// Top starred repositories fetched per user.
    pub repositories_per_user: u32,
    /// Primary language repositories must match (case-sensitive).
    pub language: String,
    /// Minimum qualifying repositories a user must keep.
    pub min_repos: usize,
    /// Minimum star count of a qualifying repository.
    pub min_stars: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            location: "Brazil".into(),
            min_followers: 100,
            result_limit: 5,
            repositories_per_user: 10,
            language: "JavaScript".into(),
            min_repos: 5,
            min_stars: 10,
        }
    }
}

/// Root configuration structure for `octoscout.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Framework identifiers detected in dependency manifests. Matching is a
    /// case-insensitive substring test, see [`crate::analysis::frameworks`].
    pub frameworks: Vec<String>,
    /// Path of the dependency manifest relative to the repository root.
    pub manifest_path: String,
    /// Maximum number of repositories per user fed to the aggregations.
    pub repository_cap: usize,
    /// Page size used when listing a user's repositories (1..=100).
    pub repository_page_size: u8,
    /// Timeout applied to every provider call, in seconds.
    pub request_timeout_secs: u64,
    /// Maximum number of per-repository fetches in flight. 1 keeps fetches
    /// strictly sequential.
    pub concurrency: usize,
    /// Profile search defaults.
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frameworks: DEFAULT_FRAMEWORKS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            manifest_path: DEFAULT_MANIFEST_PATH.into(),
            repository_cap: DEFAULT_REPOSITORY_CAP,
            repository_page_size: DEFAULT_REPOSITORY_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            concurrency: 1,
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Parse and validate configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in
    /// the working directory when no path is given. A missing default file
    /// yields the default configuration; a missing explicit file is an error.
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        if !Path::new(path).exists() {
            if explicit {
                return Err(ScoutError::invalid_config(format!(
                    "configuration file not found: {path}"
                )));
            }
            info!("no configuration found: using default");
            return Config::default().validate();
        }

        debug!("loading configuration from {path}");
        let content = fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    /// Check value ranges and normalise framework identifiers to lowercase,
    /// dropping duplicates while keeping their first position.
    pub fn validate(mut self) -> Result<Self> {
        if self.repository_cap == 0 {
            return Err(ScoutError::invalid_config(
                "repository_cap must be greater than 0",
            ));
        }

        if self.concurrency == 0 {
            return Err(ScoutError::invalid_config(
                "concurrency must be greater than 0",
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ScoutError::invalid_config(
                "request_timeout_secs must be greater than 0",
            ));
        }

        if self.repository_page_size == 0
            || self.repository_page_size > MAX_REPOSITORY_PAGE_SIZE
        {
            return Err(ScoutError::invalid_config(format!(
                "repository_page_size must be between 1 and {MAX_REPOSITORY_PAGE_SIZE}"
            )));
        }

        if self.manifest_path.trim().is_empty() {
            return Err(ScoutError::invalid_config(
                "manifest_path must not be empty",
            ));
        }

        self.frameworks = normalize_frameworks(&self.frameworks)?;

        Ok(self)
    }
}

/// Trim and lowercase framework identifiers, dropping later duplicates.
/// Empty identifiers would match every dependency and are rejected.
pub fn normalize_frameworks(frameworks: &[String]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = vec![];

    for framework in frameworks.iter() {
        let framework = framework.trim().to_lowercase();
        if framework.is_empty() {
            return Err(ScoutError::invalid_config(
                "framework identifiers must not be empty",
            ));
        }
        if !normalized.contains(&framework) {
            normalized.push(framework);
        }
    }

    Ok(normalized)
}
