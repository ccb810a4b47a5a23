//! Multi-user comparison: profile, repositories, language breakdown and
//! detected frameworks for each requested username.
//!
//! A user whose profile or repository list cannot be fetched is reported in
//! [`Comparison::failures`]; the remaining users are still compared.
use derive_builder::Builder;
use log::*;
use serde::Serialize;
use std::{sync::Arc, time::Duration};

use crate::{
    analysis::{
        frameworks::{FrameworkCounts, detect_frameworks},
        languages::{LanguageStat, aggregate_languages},
        outcome::{FetchSettings, RepositorySkip, with_timeout},
    },
    config::{
        Config, DEFAULT_FRAMEWORKS, DEFAULT_MANIFEST_PATH,
        DEFAULT_REPOSITORY_CAP, DEFAULT_REPOSITORY_PAGE_SIZE,
        DEFAULT_REQUEST_TIMEOUT_SECS, MAX_REPOSITORY_PAGE_SIZE,
        normalize_frameworks,
    },
    error::{Result, ScoutError},
    provider::{
        traits::Provider,
        types::{RepositoryDescriptor, UserProfile},
    },
};

/// Everything gathered for one compared user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAggregate {
    pub profile: UserProfile,
    /// Full repository list, unfiltered and uncapped.
    pub repositories: Vec<RepositoryDescriptor>,
    /// Ordered by percentage descending.
    pub language_stats: Vec<LanguageStat>,
    pub framework_stats: FrameworkCounts,
    /// Repositories among the capped list that had a usable manifest.
    pub manifests_found: usize,
    pub language_skips: Vec<RepositorySkip>,
    pub framework_skips: Vec<RepositorySkip>,
}

/// Step of the per-user lookup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Profile,
    Repositories,
}

/// A username that could not be compared and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFailure {
    pub username: String,
    pub stage: FailureStage,
    pub reason: String,
}

/// Result of comparing a batch of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Aggregates in request order.
    pub users: Vec<UserAggregate>,
    pub failures: Vec<UserFailure>,
}

fn default_frameworks() -> Vec<String> {
    DEFAULT_FRAMEWORKS.iter().map(|f| f.to_string()).collect()
}

#[derive(Builder)]
#[builder(build_fn(private, name = "_build"))]
pub struct ComparatorParams {
    pub provider: Arc<dyn Provider>,
    #[builder(default = "DEFAULT_REPOSITORY_CAP")]
    pub repository_cap: usize,
    #[builder(default = "DEFAULT_REPOSITORY_PAGE_SIZE")]
    pub repository_page_size: u8,
    #[builder(setter(into), default = "default_frameworks()")]
    pub frameworks: Vec<String>,
    #[builder(setter(into), default = "DEFAULT_MANIFEST_PATH.to_string()")]
    pub manifest_path: String,
    #[builder(default = "Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)")]
    pub timeout: Duration,
    #[builder(default = "1")]
    pub concurrency: usize,
}

impl ComparatorParamsBuilder {
    pub fn build(&self) -> Result<Comparator> {
        let params = self._build().map_err(|e| {
            ScoutError::invalid_config(format!(
                "Failed to build comparator: {}",
                e
            ))
        })?;
        Comparator::new(params)
    }
}

/// Runs the comparison pipeline against a provider.
pub struct Comparator {
    provider: Arc<dyn Provider>,
    repository_cap: usize,
    repository_page_size: u8,
    frameworks: Vec<String>,
    manifest_path: String,
    fetch: FetchSettings,
}

impl Comparator {
    pub fn builder() -> ComparatorParamsBuilder {
        ComparatorParamsBuilder::default()
    }

    pub fn new(params: ComparatorParams) -> Result<Self> {
        if params.repository_cap == 0 {
            return Err(ScoutError::invalid_config(
                "repository cap must be greater than 0",
            ));
        }

        if params.repository_page_size == 0
            || params.repository_page_size > MAX_REPOSITORY_PAGE_SIZE
        {
            return Err(ScoutError::invalid_config(format!(
                "repository page size must be between 1 and {MAX_REPOSITORY_PAGE_SIZE}"
            )));
        }

        if params.concurrency == 0 {
            return Err(ScoutError::invalid_config(
                "concurrency must be greater than 0",
            ));
        }

        if params.timeout.is_zero() {
            return Err(ScoutError::invalid_config(
                "timeout must be greater than 0",
            ));
        }

        if params.manifest_path.trim().is_empty() {
            return Err(ScoutError::invalid_config(
                "manifest path must not be empty",
            ));
        }

        let frameworks = normalize_frameworks(&params.frameworks)?;

        Ok(Self {
            provider: params.provider,
            repository_cap: params.repository_cap,
            repository_page_size: params.repository_page_size,
            frameworks,
            manifest_path: params.manifest_path,
            fetch: FetchSettings {
                timeout: params.timeout,
                concurrency: params.concurrency,
            },
        })
    }

    /// Build a comparator from the loaded configuration file.
    pub fn from_config(
        provider: Arc<dyn Provider>,
        config: &Config,
    ) -> Result<Self> {
        Self::builder()
            .provider(provider)
            .repository_cap(config.repository_cap)
            .repository_page_size(config.repository_page_size)
            .frameworks(config.frameworks.clone())
            .manifest_path(config.manifest_path.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .concurrency(config.concurrency)
            .build()
    }

    /// Compare every username in order. Users are processed one at a time.
    pub async fn compare(&self, usernames: &[String]) -> Comparison {
        let mut comparison = Comparison::default();

        for username in usernames.iter() {
            info!("comparing user: {username}");

            match self.compare_user(username).await {
                Ok(aggregate) => comparison.users.push(aggregate),
                Err(failure) => {
                    error!(
                        "failed to fetch {:?} for {username}: {}",
                        failure.stage, failure.reason
                    );
                    comparison.failures.push(failure);
                }
            }
        }

        comparison
    }

    /// Fetch profile and repositories for `username` and run both
    /// aggregations over the first `repository_cap` repositories.
    pub async fn compare_user(
        &self,
        username: &str,
    ) -> std::result::Result<UserAggregate, UserFailure> {
        let failure = |stage: FailureStage, err: ScoutError| UserFailure {
            username: username.to_string(),
            stage,
            reason: err.to_string(),
        };

        let profile = with_timeout(
            self.fetch.timeout,
            self.provider.get_user_profile(username),
        )
        .await
        .map_err(|e| failure(FailureStage::Profile, e))?;

        let repositories = with_timeout(
            self.fetch.timeout,
            self.provider
                .list_public_repositories(username, self.repository_page_size),
        )
        .await
        .map_err(|e| failure(FailureStage::Repositories, e))?;

        let capped =
            &repositories[..repositories.len().min(self.repository_cap)];

        debug!(
            "{username}: analysing {} of {} repositories",
            capped.len(),
            repositories.len()
        );

        let languages = aggregate_languages(
            self.provider.as_ref(),
            username,
            capped,
            &self.fetch,
        )
        .await;

        let frameworks = detect_frameworks(
            self.provider.as_ref(),
            username,
            capped,
            &self.frameworks,
            &self.manifest_path,
            &self.fetch,
        )
        .await;

        Ok(UserAggregate {
            profile,
            repositories,
            language_stats: languages.stats,
            framework_stats: frameworks.counts,
            manifests_found: frameworks.manifests_found,
            language_skips: languages.skipped,
            framework_skips: frameworks.skipped,
        })
    }
}

/// Split comma separated entries, trim them, and drop empty and repeated
/// usernames while keeping the first occurrence.
pub fn normalize_usernames(raw: &[String]) -> Vec<String> {
    let mut usernames: Vec<String> = vec![];

    for name in raw.iter().flat_map(|r| r.split(',')).map(str::trim) {
        if name.is_empty() || usernames.iter().any(|u| u == name) {
            continue;
        }
        usernames.push(name.to_string());
    }

    usernames
}

#[cfg(test)]
mod tests;
