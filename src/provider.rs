//! Read-only interface to the repository hosting platform.
//!
//! The pipelines only ever talk to a [`traits::Provider`]; [`github::Github`]
//! is the production implementation backed by the GitHub GraphQL and REST
//! APIs.

/// Connection settings and authentication for providers.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Common trait for provider abstraction.
pub mod traits;

/// Shared data types for users, repositories and file contents.
pub mod types;
