//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── client: ClientConfig   # API base URL, timeout, user agent
//! └── command: Command       # operation to run
//! ```
//!
//! Client settings can be provided via CLI arguments or environment variables.

use clap::Parser;
use templating_client::ClientConfig;

use crate::command::Command;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "templating")]
#[command(about = "Client for the templating REST API")]
#[command(version)]
pub struct Cli {
    /// API client configuration.
    #[clap(flatten)]
    pub client: ClientConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}
}
