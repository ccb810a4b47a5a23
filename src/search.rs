//! Profile search: one user search followed by a language and star filter
//! over each candidate's top repositories.
use log::*;
use serde::Serialize;

use crate::{
    error::Result,
    provider::{
        traits::Provider,
        types::{CandidateUser, RepositoryDescriptor, SearchQuery},
    },
};

/// Thresholds applied to search candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Exact, case-sensitive primary language.
    pub language: String,
    pub min_repos: usize,
    pub min_stars: u64,
}

impl SearchFilter {
    pub fn accepts(&self, repo: &RepositoryDescriptor) -> bool {
        repo.primary_language.as_deref() == Some(self.language.as_str())
            && repo.star_count >= self.min_stars
    }
}

/// A candidate that kept enough qualifying repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredUser {
    pub login: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub follower_count: u64,
    pub profile_url: String,
    /// Only the qualifying repositories, in search order.
    pub repositories: Vec<RepositoryDescriptor>,
}

/// Keep each candidate's qualifying repositories and drop candidates left
/// with fewer than `filter.min_repos`. Candidate order is preserved.
pub fn filter_users(
    candidates: Vec<CandidateUser>,
    filter: &SearchFilter,
) -> Vec<FilteredUser> {
    candidates
        .into_iter()
        .map(|user| {
            let repositories = user
                .repositories
                .into_iter()
                .filter(|repo| filter.accepts(repo))
                .collect::<Vec<RepositoryDescriptor>>();

            FilteredUser {
                login: user.login,
                name: user.name,
                location: user.location,
                follower_count: user.follower_count,
                profile_url: user.profile_url,
                repositories,
            }
        })
        .filter(|user| {
            let keep = user.repositories.len() >= filter.min_repos;
            if !keep {
                debug!(
                    "dropping {}: {} qualifying repositories",
                    user.login,
                    user.repositories.len()
                );
            }
            keep
        })
        .collect()
}

/// Issue one search and filter the candidates.
pub async fn run_search(
    provider: &dyn Provider,
    query: &SearchQuery,
    filter: &SearchFilter,
) -> Result<Vec<FilteredUser>> {
    let candidates = provider.search_users(query).await?;
    let total = candidates.len();
    let users = filter_users(candidates, filter);

    info!(
        "{} of {} candidates have at least {} {} repositories with {}+ stars",
        users.len(),
        total,
        filter.min_repos,
        filter.language,
        filter.min_stars
    );

    Ok(users)
}
