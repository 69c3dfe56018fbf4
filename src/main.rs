// sketch-import - exported sketch project validator
// Main CLI entry point

use anyhow::Context;
use clap::Parser;
use std::process;
use sketch_import::cli::{Cli, CliDispatcher};
use sketch_import::utils::config::{ConfigParser, ImportConfig};
use sketch_import::utils::error::UserError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match startup(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    };

    let result = CliDispatcher::execute(cli.command, config).await;

    if let Err(err) = result {
        let user_error = UserError::from_import_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}

/// Load configuration and install the tracing subscriber
fn startup(cli: &Cli) -> anyhow::Result<ImportConfig> {
    let config = ConfigParser::load(cli.config.as_deref()).context("failed to load configuration")?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .context("invalid log_level")?
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(config)
}
