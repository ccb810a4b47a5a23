//! Scout GitHub profiles: search developers by language and stars, and
//! compare language usage and detected web frameworks across users.
pub mod analysis;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod provider;
pub mod search;

pub use compare::{Comparator, Comparison, UserAggregate, UserFailure};
pub use config::Config;
pub use error::{Result, ScoutError};
pub use provider::{github::Github, traits::Provider};
pub use search::{FilteredUser, SearchFilter, filter_users, run_search};

#[cfg(test)]
pub mod test_helpers;
