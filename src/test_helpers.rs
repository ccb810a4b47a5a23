//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for repositories, profiles and
//! encoded manifests, reducing duplication across test suites.
use base64::{Engine, prelude::BASE64_STANDARD};

use crate::provider::types::{
    FileContents, RepositoryDescriptor, UserProfile,
};

/// Creates a repository descriptor with the given language and stars.
///
/// # Example
/// ```ignore
/// let repo = create_test_repo("api", Some("Go"), 42);
/// ```
pub fn create_test_repo(
    name: &str,
    language: Option<&str>,
    stars: u64,
) -> RepositoryDescriptor {
    RepositoryDescriptor {
        name: name.to_string(),
        url: format!("https://github.com/test/{name}"),
        star_count: stars,
        fork_count: 0,
        primary_language: language.map(|l| l.to_string()),
    }
}

/// Creates `count` repositories named `repo-0`, `repo-1`, ...
pub fn create_test_repos(count: usize) -> Vec<RepositoryDescriptor> {
    (0..count)
        .map(|i| create_test_repo(&format!("repo-{i}"), Some("Rust"), 0))
        .collect()
}

/// Creates a profile for `login` with sensible defaults.
pub fn create_test_profile(login: &str) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        name: Some(format!("{login} name")),
        avatar_url: format!("https://avatars.example/{login}"),
        follower_count: 120,
        following_count: 4,
        public_repo_count: 25,
        ..Default::default()
    }
}

/// Encodes a manifest the way the GitHub contents API transports it:
/// base64 wrapped at 60 characters.
pub fn encode_manifest(content: &str) -> FileContents {
    let encoded = BASE64_STANDARD.encode(content);
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).to_string())
        .collect::<Vec<String>>()
        .join("\n");
    FileContents::base64(wrapped)
}
