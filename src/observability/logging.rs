//! # Logging Setup
//!
//! Installs the global `tracing` subscriber. The filter comes from `RUST_LOG`
//! and defaults to `info` for this crate.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "fallback_origin_controller=info,kube_runtime=warn";

/// Initialize the global tracing subscriber
///
/// # Errors
/// Returns an error if a global subscriber was already installed
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
