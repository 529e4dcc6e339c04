//! Tracing initialization.

use std::ffi::OsString;
use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so that stdout only carries command output. The level is
/// read from `RUST_LOG` and defaults to `info`. Colors are used only when
/// stderr is a terminal and `NO_COLOR` is unset.
///
/// ```bash
/// RUST_LOG=templating_client=debug templating find --page 2
/// ```
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub(crate) fn init_tracing() -> anyhow::Result<()> {
    let env_filter = create_env_filter(std::env::var("RUST_LOG").ok().as_deref())?;
    let ansi = ansi_enabled(
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR"),
    );

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

fn create_env_filter(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = directives
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}

fn ansi_enabled(is_terminal: bool, no_color: Option<OsString>) -> bool {
    is_terminal && no_color.is_none_or(|value| value.is_empty())
}
