use clap::Parser;
use std::sync::Arc;

use octoscout::{
    Config, Github, Provider, Result,
    cli::{self, Args, Command},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("octoscout")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = Config::load(cli_args.config.as_deref()).await?;
    let provider_config = cli_args.provider_config()?;
    let has_token = provider_config.has_token();
    let provider: Arc<dyn Provider> = Arc::new(Github::new(provider_config)?);
    let out_file = cli_args.out_file.as_deref();

    match &cli_args.command {
        Command::Search(args) => {
            cli::search::execute(
                provider.as_ref(),
                &config,
                args,
                has_token,
                out_file,
            )
            .await?
        }
        Command::Compare { usernames } => {
            cli::compare::execute(provider, &config, usernames, out_file)
                .await?
        }
    }

    Ok(())
}
