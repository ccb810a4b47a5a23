use base64::{Engine, prelude::BASE64_STANDARD};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Repository summary as reported by the provider.
pub struct RepositoryDescriptor {
    pub name: String,
    pub url: String,
    pub star_count: u64,
    pub fork_count: u64,
    /// Language the provider designates as most representative.
    pub primary_language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Profile details for a single user.
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub location: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub public_repo_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// User returned by the search provider with its top starred repositories.
pub struct CandidateUser {
    pub login: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub follower_count: u64,
    pub profile_url: String,
    /// Capped, ordered by star count descending.
    pub repositories: Vec<RepositoryDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Parameters of a single user search.
pub struct SearchQuery {
    pub location: String,
    pub min_followers: u64,
    pub language: String,
    pub result_limit: u32,
    pub repositories_per_user: u32,
}

impl SearchQuery {
    /// Search qualifier string understood by the GitHub search API.
    pub fn qualifiers(&self) -> String {
        format!(
            "location:{} followers:>{} language:{}",
            self.location, self.min_followers, self.language
        )
    }
}

/// Bytes of code per language for one repository, in the order the provider
/// reported them. Language names are kept exactly as reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageByteMap(IndexMap<String, u64>);

impl LanguageByteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the byte count of `language`. An overwritten
    /// language keeps its original position.
    pub fn insert(&mut self, language: impl Into<String>, bytes: u64) {
        self.0.insert(language.into(), bytes);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, b)| (l.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageByteMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, b)| (l.into(), b)).collect())
    }
}

pub const BASE64_ENCODING: &str = "base64";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw file content as transported by the provider.
pub struct FileContents {
    /// Transport encoding, `base64` for the GitHub contents API.
    pub encoding: String,
    pub content: String,
}

impl FileContents {
    pub fn base64(content: impl Into<String>) -> Self {
        Self {
            encoding: BASE64_ENCODING.into(),
            content: content.into(),
        }
    }

    /// Decode the transport encoding into UTF-8 text. GitHub wraps base64
    /// payloads every 60 characters so whitespace is stripped first.
    pub fn decode(&self) -> Result<String> {
        if !self.encoding.eq_ignore_ascii_case(BASE64_ENCODING) {
            return Ok(self.content.clone());
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = BASE64_STANDARD.decode(compact)?;
        Ok(String::from_utf8(bytes)?)
    }
}
