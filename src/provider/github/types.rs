use serde::{Deserialize, Serialize};

use crate::provider::types::{RepositoryDescriptor, UserProfile};

/// Subset of `GET /users/{username}`.
#[derive(Debug, Deserialize)]
pub struct RestUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub location: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// Subset of an entry of `GET /users/{username}/repos`.
#[derive(Debug, Deserialize)]
pub struct RestRepository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListReposParams {
    pub per_page: u8,
}

impl From<RestUser> for UserProfile {
    fn from(user: RestUser) -> Self {
        Self {
            login: user.login,
            name: user.name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            location: user.location,
            follower_count: user.followers,
            following_count: user.following,
            public_repo_count: user.public_repos,
        }
    }
}

impl From<RestRepository> for RepositoryDescriptor {
    fn from(repo: RestRepository) -> Self {
        Self {
            name: repo.name,
            url: repo.html_url,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            primary_language: repo.language,
        }
    }
}
