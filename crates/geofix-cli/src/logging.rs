//! Log subscriber setup

use crate::config::{CliConfig, Verbosity};
use tracing_subscriber::EnvFilter;

/// Filter for this process: `RUST_LOG` when set, otherwise the verbosity level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init();
}
