//! Runs the multi-user comparison subcommand
use log::*;
use std::sync::Arc;

use crate::{
    cli::output::print_json,
    compare::{Comparator, normalize_usernames},
    config::Config,
    error::{Result, ScoutError},
    provider::traits::Provider,
};

/// Compare the given users and print the comparison as JSON. Users that
/// could not be fetched are listed under `failures`.
pub async fn execute(
    provider: Arc<dyn Provider>,
    config: &Config,
    usernames: &[String],
    out_file: Option<&str>,
) -> Result<()> {
    let usernames = normalize_usernames(usernames);

    if usernames.is_empty() {
        return Err(ScoutError::invalid_args("no usernames to compare"));
    }

    let comparator = Comparator::from_config(provider, config)?;
    let comparison = comparator.compare(&usernames).await;

    if !comparison.failures.is_empty() {
        warn!(
            "{} of {} users could not be compared",
            comparison.failures.len(),
            usernames.len()
        );
    }

    print_json(&comparison, out_file).await
}
