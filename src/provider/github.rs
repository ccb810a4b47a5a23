//! Implements the Provider trait for GitHub
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;

pub mod graphql;
pub mod types;

use crate::{
    error::{Result, ScoutError},
    provider::{
        config::ProviderConfig,
        github::{
            graphql::{
                GraphqlResponse, USER_SEARCH_QUERY, UserSearchData,
                UserSearchVariables,
            },
            types::{ListReposParams, RestRepository, RestUser},
        },
        traits::Provider,
        types::{
            CandidateUser, FileContents, LanguageByteMap,
            RepositoryDescriptor, SearchQuery, UserProfile,
        },
    },
};

/// GitHub provider using Octocrab for GraphQL user search and REST lookups
/// of profiles, repositories, languages and file contents.
pub struct Github {
    config: ProviderConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with optional personal access token
    /// authentication and API base URL configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut builder = Octocrab::builder().base_uri(config.base_uri())?;

        if let Some(token) = config.token.clone() {
            builder = builder.personal_token(token);
        } else {
            warn!("no github token configured: using anonymous requests");
        }

        let instance = builder.build()?;

        Ok(Self { config, instance })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for Github {
    async fn search_users(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<CandidateUser>> {
        let vars = UserSearchVariables {
            query: query.qualifiers(),
            first: query.result_limit,
            repo_limit: query.repositories_per_user,
        };

        debug!("searching users: {}", vars.query);

        let json = serde_json::json!({
          "query": USER_SEARCH_QUERY,
          "variables": vars,
        });

        let result: GraphqlResponse<UserSearchData> =
            self.instance.graphql(&json).await?;

        if let Some(errors) = result.errors
            && !errors.is_empty()
        {
            let msg = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<String>>()
                .join("; ");
            error!("user search failed: {msg}");
            return Err(ScoutError::provider(format!(
                "GitHub GraphQL error: {msg}"
            )));
        }

        let data = result
            .data
            .ok_or(ScoutError::provider("GitHub GraphQL returned no data"))?;

        let users = data.into_candidates();

        info!("user search returned {} candidates", users.len());

        Ok(users)
    }

    async fn get_user_profile(&self, username: &str) -> Result<UserProfile> {
        let route = format!("/users/{username}");
        debug!("fetching profile: {route}");
        let user: RestUser = self.instance.get(route, None::<&()>).await?;
        Ok(user.into())
    }

    async fn list_public_repositories(
        &self,
        username: &str,
        page_size: u8,
    ) -> Result<Vec<RepositoryDescriptor>> {
        let route = format!("/users/{username}/repos");
        let params = ListReposParams {
            per_page: page_size,
        };

        debug!("listing repositories: {route} per_page={page_size}");

        let repos: Vec<RestRepository> =
            self.instance.get(route, Some(&params)).await?;

        Ok(repos.into_iter().map(RepositoryDescriptor::from).collect())
    }

    async fn get_language_bytes(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageByteMap> {
        let route = format!("/repos/{owner}/{repo}/languages");
        debug!("fetching languages: {route}");

        let languages: LanguageByteMap =
            self.instance.get(route, None::<&()>).await?;

        Ok(languages)
    }

    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<FileContents>> {
        let result = self
            .instance
            .repos(owner, repo)
            .get_content()
            .path(path)
            .send()
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                debug!("no file found for path: {owner}/{repo}/{path}");
                Ok(None)
            }
            Err(err) => {
                debug!(
                    "encountered error getting file contents for path: {owner}/{repo}/{path}: {err}"
                );
                Err(err.into())
            }
            Ok(mut data) => {
                let items = data.take_items();

                let Some(item) = items.into_iter().next() else {
                    debug!("no file found for path: {owner}/{repo}/{path}");
                    return Ok(None);
                };

                match item.content {
                    Some(content) => Ok(Some(FileContents {
                        encoding: item.encoding.unwrap_or_default(),
                        content,
                    })),
                    // directories and submodules carry no content
                    None => Ok(None),
                }
            }
        }
    }
}
