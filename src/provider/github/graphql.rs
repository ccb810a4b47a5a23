use serde::{Deserialize, Serialize};

use crate::provider::types::{CandidateUser, RepositoryDescriptor};

pub const USER_SEARCH_QUERY: &str = r#"
query SearchUsers($query: String!, $first: Int!, $repo_limit: Int!) {
  search(query: $query, type: USER, first: $first) {
    edges {
      node {
        ... on User {
          login
          name
          location
          followers {
            totalCount
          }
          url
          repositories(first: $repo_limit, privacy: PUBLIC, orderBy: {field: STARGAZERS, direction: DESC}) {
            nodes {
              name
              url
              stargazerCount
              forkCount
              primaryLanguage {
                name
              }
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
pub struct UserSearchVariables {
    pub query: String,
    pub first: u32,
    pub repo_limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
}

/// GraphQL envelope: `data` may be missing when `errors` is populated.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct TotalCount {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRepositoryNode {
    pub name: String,
    pub url: String,
    #[serde(rename = "stargazerCount")]
    pub stargazer_count: u64,
    #[serde(rename = "forkCount")]
    pub fork_count: u64,
    #[serde(rename = "primaryLanguage")]
    pub primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRepositories {
    pub nodes: Vec<SearchRepositoryNode>,
}

/// Search nodes that are not users (organizations) come back as empty
/// objects, so every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchUserNode {
    pub login: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub followers: Option<TotalCount>,
    pub url: Option<String>,
    pub repositories: Option<SearchRepositories>,
}

#[derive(Debug, Deserialize)]
pub struct SearchEdge {
    pub node: SearchUserNode,
}

#[derive(Debug, Deserialize)]
pub struct SearchConnection {
    pub edges: Vec<SearchEdge>,
}

#[derive(Debug, Deserialize)]
pub struct UserSearchData {
    pub search: SearchConnection,
}

impl From<SearchRepositoryNode> for RepositoryDescriptor {
    fn from(node: SearchRepositoryNode) -> Self {
        Self {
            name: node.name,
            url: node.url,
            star_count: node.stargazer_count,
            fork_count: node.fork_count,
            primary_language: node.primary_language.map(|l| l.name),
        }
    }
}

impl UserSearchData {
    /// Convert search edges into candidate users, skipping non-user nodes.
    pub fn into_candidates(self) -> Vec<CandidateUser> {
        self.search
            .edges
            .into_iter()
            .filter_map(|edge| {
                let node = edge.node;
                let login = node.login?;
                Some(CandidateUser {
                    login,
                    name: node.name,
                    location: node.location,
                    follower_count: node
                        .followers
                        .map(|f| f.total_count)
                        .unwrap_or_default(),
                    profile_url: node.url.unwrap_or_default(),
                    repositories: node
                        .repositories
                        .map(|r| r.nodes)
                        .unwrap_or_default()
                        .into_iter()
                        .map(RepositoryDescriptor::from)
                        .collect(),
                })
            })
            .collect()
    }
}
