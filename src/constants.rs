//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable (see [`crate::config::ControllerConfig`]).

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default requeue interval after a successful reconciliation (seconds)
/// The remote resource is never cached, so this is how often drift is detected
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Default requeue interval for reconciliation errors (seconds)
pub const DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS: u64 = 30;

/// Default upper bound on concurrent reconciliations
pub const DEFAULT_MAX_CONCURRENT_RECONCILIATIONS: u16 = 10;

/// Cloudflare API v4 base URL
pub const DEFAULT_CLOUDFLARE_API_ENDPOINT: &str = "https://api.cloudflare.com/client/v4";

/// Per-request timeout for Cloudflare API calls (seconds)
pub const DEFAULT_CLOUDFLARE_API_TIMEOUT_SECS: u64 = 30;

/// Name of the ProviderConfig used when a resource does not reference one
pub const DEFAULT_PROVIDER_CONFIG_NAME: &str = "default";

/// Finalizer guarding external resources against orphaning on delete
pub const MANAGED_RESOURCE_FINALIZER: &str = "finalizer.managedresource.crossplane.io";

/// Annotation holding the identifier of the external resource
pub const EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";

/// Cloudflare error code returned when a zone has no fallback origin
pub const FALLBACK_ORIGIN_NOT_FOUND_CODE: &str = "1551";
