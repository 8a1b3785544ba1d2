//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_CLOUDFLARE_API_ENDPOINT, DEFAULT_CLOUDFLARE_API_TIMEOUT_SECS,
    DEFAULT_MAX_CONCURRENT_RECONCILIATIONS, DEFAULT_METRICS_PORT, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
};
use std::str::FromStr;
use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Environment variables are populated from a ConfigMap using `envFrom` in the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Port for `/metrics`, `/healthz` and `/readyz`
    pub metrics_port: u16,
    /// Requeue delay after a successful reconciliation (seconds)
    pub poll_interval_secs: u64,
    /// Requeue delay after a failed reconciliation (seconds)
    pub reconciliation_error_requeue_secs: u64,
    /// Maximum concurrent reconciliations
    pub max_concurrent_reconciliations: u16,
    /// Cloudflare API base URL
    pub cloudflare_api_endpoint: String,
    /// Cloudflare per-request timeout (seconds)
    pub cloudflare_api_timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            metrics_port: DEFAULT_METRICS_PORT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            reconciliation_error_requeue_secs: DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
            max_concurrent_reconciliations: DEFAULT_MAX_CONCURRENT_RECONCILIATIONS,
            cloudflare_api_endpoint: DEFAULT_CLOUDFLARE_API_ENDPOINT.to_string(),
            cloudflare_api_timeout_secs: DEFAULT_CLOUDFLARE_API_TIMEOUT_SECS,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            metrics_port: parse_or(&lookup, "METRICS_PORT", DEFAULT_METRICS_PORT),
            poll_interval_secs: parse_or(&lookup, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS),
            reconciliation_error_requeue_secs: parse_or(
                &lookup,
                "RECONCILIATION_ERROR_REQUEUE_SECS",
                DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
            ),
            max_concurrent_reconciliations: parse_or(
                &lookup,
                "MAX_CONCURRENT_RECONCILIATIONS",
                DEFAULT_MAX_CONCURRENT_RECONCILIATIONS,
            ),
            cloudflare_api_endpoint: lookup("CLOUDFLARE_API_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(
                    || DEFAULT_CLOUDFLARE_API_ENDPOINT.to_string(),
                    |v| v.trim_end_matches('/').to_string(),
                ),
            cloudflare_api_timeout_secs: parse_or(
                &lookup,
                "CLOUDFLARE_API_TIMEOUT_SECS",
                DEFAULT_CLOUDFLARE_API_TIMEOUT_SECS,
            ),
        }
    }

    /// Requeue duration after a successful reconciliation
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Requeue duration after a failed reconciliation
    #[must_use]
    pub fn reconciliation_error_requeue_duration(&self) -> Duration {
        Duration::from_secs(self.reconciliation_error_requeue_secs)
    }

    /// Cloudflare request timeout
    #[must_use]
    pub fn cloudflare_api_timeout(&self) -> Duration {
        Duration::from_secs(self.cloudflare_api_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value '{}' for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}
