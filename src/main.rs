mod commands;
mod config;
mod fetch;
mod output;
mod panlex;

pub const USER_AGENT: &str = concat!("panlex-lexicon/", env!("CARGO_PKG_VERSION"));

use std::process::ExitCode;

use clap::Parser;
use commands::{Cli, CommandError};
use config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("invalid log filter: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let config = Config::from_env();
    info!(data_dir = %config.data_dir.display(), version = %config.version, "starting panlex-lexicon");

    report(commands::run(cli.command, &config).await)
}

fn init_tracing() -> Result<(), tracing_subscriber::filter::ParseError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("panlex_lexicon=info".parse()?),
        )
        .init();
    Ok(())
}

/// Log a failed command with its hint. The error is reported once, through tracing.
fn report(result: Result<(), CommandError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if let Some(hint) = e.hint() {
                error!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}
