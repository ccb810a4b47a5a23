//! Runs the profile search subcommand
use log::*;

use crate::{
    cli::{SearchArgs, output::print_json},
    config::Config,
    error::{Result, ScoutError},
    provider::traits::Provider,
    search::run_search,
};

/// Search users and print the filtered profiles as JSON.
pub async fn execute(
    provider: &dyn Provider,
    config: &Config,
    args: &SearchArgs,
    has_token: bool,
    out_file: Option<&str>,
) -> Result<()> {
    if !has_token {
        return Err(ScoutError::invalid_args(
            "search requires a GitHub token: pass --token or set GITHUB_TOKEN",
        ));
    }

    let (query, filter) = args.resolve(&config.search);

    info!(
        "searching users: {} (language {}, min repos {}, min stars {})",
        query.qualifiers(),
        filter.language,
        filter.min_repos,
        filter.min_stars
    );

    let users = run_search(provider, &query, &filter).await?;

    print_json(&users, out_file).await
}
