//! Per-repository fetch outcomes shared by the aggregations.
//!
//! A failed lookup for one repository never aborts an aggregation. Instead
//! the failure becomes a [`FetchOutcome::Skipped`] carrying the reason,
//! which the aggregation folds into its report next to the successful data.
use futures_util::{StreamExt, stream};
use serde::Serialize;
use std::{fmt, future::Future, time::Duration};

use crate::{
    error::{Result, ScoutError},
    provider::types::RepositoryDescriptor,
};

/// Why a repository contributed nothing to an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The requested resource does not exist.
    NotFound,
    /// The provider did not answer within the configured timeout
    /// (milliseconds).
    TimedOut(u64),
    /// The provider call failed.
    FetchFailed(String),
    /// The content could not be decoded from its transport encoding.
    Decode(String),
    /// The decoded content is not a valid document.
    Parse(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::TimedOut(ms) => write!(f, "timed out after {ms} ms"),
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {msg}"),
            SkipReason::Decode(msg) => write!(f, "decode failed: {msg}"),
            SkipReason::Parse(msg) => write!(f, "parse failed: {msg}"),
        }
    }
}

impl From<ScoutError> for SkipReason {
    fn from(err: ScoutError) -> Self {
        match err {
            ScoutError::NotFound(_) => SkipReason::NotFound,
            ScoutError::Timeout(ms) => SkipReason::TimedOut(ms),
            other => SkipReason::FetchFailed(other.to_string()),
        }
    }
}

/// Result of fetching one repository's data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Success(T),
    Skipped(SkipReason),
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

impl<T> From<Result<T>> for FetchOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Success(value),
            Err(err) => FetchOutcome::Skipped(err.into()),
        }
    }
}

/// A repository skipped by an aggregation and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySkip {
    pub repository: String,
    pub reason: SkipReason,
}

/// Timeout and fan-out applied to per-repository provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub timeout: Duration,
    /// Maximum number of calls in flight, 1 for strictly sequential.
    pub concurrency: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(
                crate::config::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            concurrency: 1,
        }
    }
}

fn elapsed_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

/// Run `fut`, failing with [`ScoutError::Timeout`] once `timeout` elapses.
pub async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(ScoutError::Timeout(elapsed_millis(timeout))),
    }
}

/// Apply `fetch` to every repository with at most `settings.concurrency`
/// calls in flight. Outcomes are returned in repository order regardless of
/// completion order.
pub async fn fetch_each<'a, T, F, Fut>(
    repositories: &'a [RepositoryDescriptor],
    settings: &FetchSettings,
    fetch: F,
) -> Vec<(&'a RepositoryDescriptor, FetchOutcome<T>)>
where
    F: Fn(&'a RepositoryDescriptor) -> Fut,
    Fut: Future<Output = FetchOutcome<T>>,
{
    let timeout = settings.timeout;

    stream::iter(repositories.iter())
        .map(|repo| {
            let fut = fetch(repo);
            async move {
                let outcome = match tokio::time::timeout(timeout, fut).await {
                    Ok(outcome) => outcome,
                    Err(_) => FetchOutcome::Skipped(SkipReason::TimedOut(
                        elapsed_millis(timeout),
                    )),
                };
                (repo, outcome)
            }
        })
        .buffered(settings.concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos(names: &[&str]) -> Vec<RepositoryDescriptor> {
        names
            .iter()
            .map(|n| RepositoryDescriptor {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn maps_errors_to_skip_reasons() {
        let reason: SkipReason = ScoutError::NotFound("x".into()).into();
        assert_eq!(reason, SkipReason::NotFound);

        let reason: SkipReason = ScoutError::Timeout(5_000).into();
        assert_eq!(reason, SkipReason::TimedOut(5_000));
        assert_eq!(reason.to_string(), "timed out after 5000 ms");

        let reason: SkipReason = ScoutError::provider("boom").into();
        assert_eq!(
            reason,
            SkipReason::FetchFailed("Provider request failed: boom".into())
        );
    }

    #[test]
    fn outcome_from_result() {
        let ok: FetchOutcome<u8> = Ok(1).into();
        assert_eq!(ok, FetchOutcome::Success(1));

        let skipped: FetchOutcome<u8> =
            Err(ScoutError::NotFound("gone".into())).into();
        assert!(!skipped.is_success());
    }

    #[tokio::test]
    async fn with_timeout_reports_elapsed() {
        let result: Result<()> =
            with_timeout(Duration::from_millis(10), async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(ScoutError::Timeout(10))));
    }

    #[tokio::test]
    async fn fetch_each_keeps_repository_order_when_concurrent() {
        let repositories = repos(&["slow", "fast", "medium"]);
        let settings = FetchSettings {
            timeout: Duration::from_secs(5),
            concurrency: 3,
        };

        let outcomes = fetch_each(&repositories, &settings, |repo| async move {
            let delay = match repo.name.as_str() {
                "slow" => 30,
                "medium" => 15,
                _ => 1,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            FetchOutcome::Success(repo.name.clone())
        })
        .await;

        let names: Vec<&str> =
            outcomes.iter().map(|(r, _)| r.name.as_str()).collect();
        assert_eq!(names, vec!["slow", "fast", "medium"]);
        assert!(outcomes.iter().all(|(_, o)| o.is_success()));
    }

    #[tokio::test]
    async fn fetch_each_times_out_single_repository() {
        let repositories = repos(&["ok", "hangs"]);
        let settings = FetchSettings {
            timeout: Duration::from_millis(20),
            concurrency: 1,
        };

        let outcomes = fetch_each(&repositories, &settings, |repo| async move {
            if repo.name == "hangs" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            FetchOutcome::Success(())
        })
        .await;

        assert!(outcomes[0].1.is_success());
        assert_eq!(
            outcomes[1].1,
            FetchOutcome::Skipped(SkipReason::TimedOut(20))
        );
    }

    #[test]
    fn timed_out_serializes_milliseconds() {
        let skip = RepositorySkip {
            repository: "hangs".into(),
            reason: SkipReason::TimedOut(250),
        };
        let json = serde_json::to_value(&skip).unwrap();
        assert_eq!(json["reason"]["kind"], "timed_out");
        assert_eq!(json["reason"]["detail"], 250);
    }
}
