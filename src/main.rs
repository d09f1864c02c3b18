//! Muzeum - visitor and curator client for the Muzeum Września 1939 REST API

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use muzeum::{
    cli::{self, Cli, CliState},
    config::Config,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muzeum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<cli::CliError>() {
                Some(cli_error) => {
                    tracing::error!("Command failed: {}", cli_error);
                    eprintln!("{}", cli_error.user_message());
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_with_env(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
        config.validate()?;
    }
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let state = CliState::new(&config)?;
    cli::run(cli.command, &state).await?;
    Ok(())
}
