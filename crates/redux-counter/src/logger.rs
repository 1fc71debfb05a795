//! Logging setup using env_logger
//!
//! `RUST_LOG` wins over the configured default level.

use anyhow::{Context, Result};

/// Initialize stderr logging with `default_level` as fallback filter
pub fn init(default_level: &str) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")
}
