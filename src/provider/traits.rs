//! Traits related to remote repository-metadata providers
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    provider::types::{
        CandidateUser, FileContents, LanguageByteMap, RepositoryDescriptor,
        SearchQuery, UserProfile,
    },
};

/// Read-only view of a hosting provider consumed by the search and
/// comparison pipelines.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Run one user search returning candidates with their top starred
    /// repositories.
    async fn search_users(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<CandidateUser>>;

    async fn get_user_profile(&self, username: &str) -> Result<UserProfile>;

    /// List public repositories in provider default order.
    async fn list_public_repositories(
        &self,
        username: &str,
        page_size: u8,
    ) -> Result<Vec<RepositoryDescriptor>>;

    async fn get_language_bytes(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageByteMap>;

    /// Raw encoded content of `path` on the default branch, `None` when the
    /// file does not exist.
    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<FileContents>>;
}
