#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use templating_client::TemplatingClient;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "templating_cli::startup";
pub const TRACING_TARGET_COMMAND: &str = "templating_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %error,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    log_startup_info(&cli);

    let client =
        TemplatingClient::from_config(cli.client.clone()).context("failed to create API client")?;

    let output = cli.command.execute(&client).await?;
    println!("{}", command::render(&output)?);

    Ok(())
}

/// Logs startup information.
fn log_startup_info(cli: &Cli) {
    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        base_url = %cli.client.base_url(),
        timeout_secs = cli.client.effective_timeout().as_secs(),
        command = cli.command.name(),
        "starting templating cli"
    );
}
