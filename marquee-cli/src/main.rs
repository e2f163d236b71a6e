//! Marquee CLI - Command-line interface
//!
//! Runs the web UI and exposes search, trending and detail lookups from the
//! terminal.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use marquee_core::tracing_setup::{CliLogLevel, LogSettings, init_tracing};
use marquee_core::{MarqueeConfig, MarqueeError, RuntimeMode};
use tracing::error;

/// Exit status for configuration and setup mistakes.
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Movie discovery with live search and trending searches")]
#[command(version)]
struct Cli {
    /// Console log level; the full log always goes to logs/marquee-last-run.log
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// production talks to TMDB, development serves the built-in catalog
    #[arg(long, global = true, default_value_t = RuntimeMode::Development)]
    mode: RuntimeMode,

    #[command(subcommand)]
    command: commands::Commands,
}

/// Message and exit status reported for a failed command.
fn describe_failure(failure: &anyhow::Error) -> (String, u8) {
    match failure.downcast_ref::<MarqueeError>() {
        Some(e) if e.is_user_error() => (e.user_message(), USAGE_EXIT_CODE),
        Some(e) => (e.user_message(), 1),
        None => (format!("{failure:#}"), 1),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&LogSettings::new(cli.log_level)) {
        eprintln!("Failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    let config = MarqueeConfig::from_env();
    match commands::handle_command(cli.command, config, cli.mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!("Command failed: {failure:#}");
            let (message, code) = describe_failure(&failure);
            eprintln!("Error: {message}");
            ExitCode::from(code)
        }
    }
}
