//! Tests for the multi-user comparison pipeline.
//!
//! Tests for:
//! - Building a comparator from params and configuration
//! - Repository capping and the unfiltered repository list
//! - Partial results when a user's profile or repositories fail
//! - Username normalisation

use std::{sync::Arc, time::Duration};

use super::*;
use crate::{
    analysis::outcome::SkipReason,
    provider::traits::MockProvider,
    test_helpers::{create_test_profile, create_test_repos, encode_manifest},
};

fn comparator(mock: MockProvider) -> Comparator {
    Comparator::builder()
        .provider(Arc::new(mock) as Arc<dyn Provider>)
        .build()
        .unwrap()
}

fn usernames(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn builder_applies_defaults() {
    let comparator = comparator(MockProvider::new());
    assert_eq!(comparator.repository_cap, 20);
    assert_eq!(comparator.repository_page_size, 100);
    assert_eq!(comparator.frameworks.len(), 7);
    assert_eq!(comparator.manifest_path, "package.json");
    assert_eq!(comparator.fetch.concurrency, 1);
    assert_eq!(comparator.fetch.timeout, Duration::from_secs(30));
}

#[test]
fn builder_requires_provider() {
    let result = Comparator::builder().build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));
}

#[test]
fn builder_rejects_invalid_values() {
    let provider: Arc<dyn Provider> = Arc::new(MockProvider::new());

    let result = Comparator::builder()
        .provider(Arc::clone(&provider))
        .repository_cap(0)
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));

    let result = Comparator::builder()
        .provider(Arc::clone(&provider))
        .repository_page_size(0)
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));

    let result = Comparator::builder()
        .provider(Arc::clone(&provider))
        .concurrency(0)
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));

    let result = Comparator::builder()
        .provider(Arc::clone(&provider))
        .timeout(Duration::ZERO)
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));

    let result = Comparator::builder()
        .provider(Arc::clone(&provider))
        .manifest_path(" ")
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));

    let result = Comparator::builder()
        .provider(provider)
        .frameworks(usernames(&["react", "React", ""]))
        .build();
    assert!(matches!(result, Err(ScoutError::InvalidConfig(_))));
}

#[test]
fn builder_normalizes_frameworks() {
    let comparator = Comparator::builder()
        .provider(Arc::new(MockProvider::new()) as Arc<dyn Provider>)
        .frameworks(usernames(&["React", "react", " Vue "]))
        .build()
        .unwrap();
    assert_eq!(comparator.frameworks, vec!["react", "vue"]);
}

#[tokio::test]
async fn builder_frameworks_match_mixed_case_dependencies() {
    let mut mock = MockProvider::new();
    mock.expect_get_user_profile()
        .returning(|u| Ok(create_test_profile(u)));
    mock.expect_list_public_repositories()
        .returning(|_, _| Ok(create_test_repos(1)));
    mock.expect_get_language_bytes()
        .returning(|_, _| Ok([("TypeScript", 10)].into_iter().collect()));
    mock.expect_get_file_contents().returning(|_, _, _| {
        Ok(Some(encode_manifest(
            r#"{ "dependencies": { "react-dom": "18" } }"#,
        )))
    });

    let comparator = Comparator::builder()
        .provider(Arc::new(mock) as Arc<dyn Provider>)
        .frameworks(usernames(&["React"]))
        .build()
        .unwrap();

    let comparison = comparator.compare(&usernames(&["octo"])).await;
    assert_eq!(comparison.users[0].framework_stats.get("react"), Some(&1));
}

#[test]
fn from_config_uses_configured_values() {
    let config = Config::from_toml(
        r#"
frameworks = ["Solid"]
manifest_path = "web/package.json"
repository_cap = 3
concurrency = 2
request_timeout_secs = 5
"#,
    )
    .unwrap();

    let comparator =
        Comparator::from_config(Arc::new(MockProvider::new()), &config)
            .unwrap();

    assert_eq!(comparator.frameworks, vec!["solid"]);
    assert_eq!(comparator.manifest_path, "web/package.json");
    assert_eq!(comparator.repository_cap, 3);
    assert_eq!(comparator.fetch.concurrency, 2);
    assert_eq!(comparator.fetch.timeout, Duration::from_secs(5));
}

#[tokio::test]
async fn aggregates_only_capped_repositories() {
    let mut mock = MockProvider::new();
    mock.expect_get_user_profile()
        .returning(|u| Ok(create_test_profile(u)));
    mock.expect_list_public_repositories()
        .withf(|u, page_size| u == "octo" && *page_size == 100)
        .returning(|_, _| Ok(create_test_repos(25)));
    mock.expect_get_language_bytes()
        .times(20)
        .returning(|_, _| Ok([("JavaScript", 10)].into_iter().collect()));
    mock.expect_get_file_contents()
        .times(20)
        .returning(|_, _, _| {
            Ok(Some(encode_manifest(
                r#"{ "dependencies": { "express": "4" } }"#,
            )))
        });

    let comparison = comparator(mock).compare(&usernames(&["octo"])).await;

    assert!(comparison.failures.is_empty());
    assert_eq!(comparison.users.len(), 1);

    let user = &comparison.users[0];
    assert_eq!(user.profile.login, "octo");
    assert_eq!(user.repositories.len(), 25);
    assert_eq!(user.language_stats.len(), 1);
    assert_eq!(user.language_stats[0].language, "JavaScript");
    assert_eq!(user.language_stats[0].percentage, "100.00");
    assert_eq!(user.framework_stats.get("express"), Some(&20));
    assert_eq!(user.manifests_found, 20);
}

#[tokio::test]
async fn returns_partial_results_when_a_user_fails() {
    let mut mock = MockProvider::new();
    mock.expect_get_user_profile()
        .withf(|u| u == "ghost")
        .returning(|_| Err(ScoutError::NotFound("Not Found".into())));
    mock.expect_get_user_profile()
        .withf(|u| u != "ghost")
        .returning(|u| Ok(create_test_profile(u)));
    mock.expect_list_public_repositories()
        .withf(|u, _| u == "broken")
        .returning(|_, _| Err(ScoutError::RateLimitExceeded));
    mock.expect_list_public_repositories()
        .withf(|u, _| u == "octo")
        .returning(|_, _| Ok(create_test_repos(1)));
    mock.expect_get_language_bytes()
        .returning(|_, _| Ok([("Rust", 10)].into_iter().collect()));
    mock.expect_get_file_contents().returning(|_, _, _| Ok(None));

    let comparison = comparator(mock)
        .compare(&usernames(&["ghost", "octo", "broken"]))
        .await;

    assert_eq!(comparison.users.len(), 1);
    assert_eq!(comparison.users[0].profile.login, "octo");
    assert_eq!(
        comparison.users[0].framework_skips[0].reason,
        SkipReason::NotFound
    );

    assert_eq!(comparison.failures.len(), 2);
    assert_eq!(comparison.failures[0].username, "ghost");
    assert_eq!(comparison.failures[0].stage, FailureStage::Profile);
    assert_eq!(comparison.failures[1].username, "broken");
    assert_eq!(comparison.failures[1].stage, FailureStage::Repositories);
    assert_eq!(comparison.failures[1].reason, "API rate limit exceeded");
}

#[tokio::test]
async fn user_without_repositories_has_empty_stats() {
    let mut mock = MockProvider::new();
    mock.expect_get_user_profile()
        .returning(|u| Ok(create_test_profile(u)));
    mock.expect_list_public_repositories()
        .returning(|_, _| Ok(vec![]));
    mock.expect_get_language_bytes().never();
    mock.expect_get_file_contents().never();

    let comparison = comparator(mock).compare(&usernames(&["empty"])).await;

    let user = &comparison.users[0];
    assert!(user.repositories.is_empty());
    assert!(user.language_stats.is_empty());
    assert!(user.framework_stats.is_empty());
    assert_eq!(user.manifests_found, 0);
}

#[tokio::test]
async fn empty_username_list_yields_empty_comparison() {
    let comparison = comparator(MockProvider::new()).compare(&[]).await;
    assert_eq!(comparison, Comparison::default());
}

#[test]
fn normalizes_usernames() {
    let raw = usernames(&["octo, torvalds", " ", "octo", "gaearon,,"]);
    assert_eq!(
        normalize_usernames(&raw),
        vec!["octo", "torvalds", "gaearon"]
    );
}
