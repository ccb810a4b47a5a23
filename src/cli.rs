//! CLI argument parsing and provider configuration.
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::{
    config::SearchConfig,
    error::Result,
    provider::{
        config::{DEFAULT_API_URL, ProviderConfig},
        types::SearchQuery,
    },
    search::SearchFilter,
};

pub mod compare;
pub mod output;
pub mod search;

/// Global CLI arguments for provider configuration and output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,

    #[arg(long, default_value = DEFAULT_API_URL, global = true)]
    /// GitHub API root. Use https://<host>/api/v3 for Enterprise.
    pub api_url: String,

    #[arg(long, global = true)]
    /// Path to configuration file. Defaults to ./octoscout.toml if present.
    pub config: Option<String>,

    #[arg(long, global = true)]
    /// Write JSON output to this file instead of stdout.
    pub out_file: Option<String>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Pipelines exposed by the CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search users by location and followers, keeping those with enough
    /// starred repositories in a language.
    Search(SearchArgs),

    /// Compare language usage and detected frameworks across users.
    Compare {
        /// Usernames to compare. Comma separated lists are accepted.
        #[arg(required = true)]
        usernames: Vec<String>,
    },
}

/// Overrides for the `[search]` configuration section.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct SearchArgs {
    #[arg(long)]
    /// Primary language repositories must have (case-sensitive).
    pub language: Option<String>,

    #[arg(long)]
    /// Minimum number of qualifying repositories per user.
    pub min_repos: Option<usize>,

    #[arg(long)]
    /// Minimum stars of a qualifying repository.
    pub min_stars: Option<u64>,

    #[arg(long)]
    /// Location qualifier for the user search.
    pub location: Option<String>,

    #[arg(long)]
    /// Users must have more followers than this.
    pub min_followers: Option<u64>,

    #[arg(long)]
    /// Number of users requested from the search.
    pub limit: Option<u32>,
}

impl Args {
    /// Provider connection settings from CLI arguments.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        ProviderConfig::new(&self.api_url, self.token.clone())
    }
}

impl SearchArgs {
    /// Merge CLI overrides over configured search defaults.
    pub fn resolve(&self, defaults: &SearchConfig) -> (SearchQuery, SearchFilter) {
        let language = self
            .language
            .clone()
            .unwrap_or_else(|| defaults.language.clone());

        let query = SearchQuery {
            location: self
                .location
                .clone()
                .unwrap_or_else(|| defaults.location.clone()),
            min_followers: self.min_followers.unwrap_or(defaults.min_followers),
            language: language.clone(),
            result_limit: self.limit.unwrap_or(defaults.result_limit),
            repositories_per_user: defaults.repositories_per_user,
        };

        let filter = SearchFilter {
            language,
            min_repos: self.min_repos.unwrap_or(defaults.min_repos),
            min_stars: self.min_stars.unwrap_or(defaults.min_stars),
        };

        (query, filter)
    }
}
