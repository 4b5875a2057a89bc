//! Tracing setup for the userctl binary
//!
//! Usage:
//!   userctl --debug ...              # Debug logging to console
//!   RUST_LOG=userctl=debug userctl   # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Keep only warnings and errors
    pub quiet: bool,
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
}

/// Initialize console tracing.
///
/// RUST_LOG, when set, wins over both flags.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug {
        "debug"
    } else if config.quiet {
        "warn"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_neither_quiet_nor_debug() {
        let config = TracingConfig::default();
        assert!(!config.quiet);
        assert!(!config.debug);
    }
}
