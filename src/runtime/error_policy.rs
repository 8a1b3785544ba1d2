//! # Error Policy
//!
//! Error handling for the controller watch loop.
//! This module handles reconciliation errors and controller stream errors.

use crate::controller::reconciler::{Reconciler, ReconcilerError};
use crate::crd::FallbackOrigin;
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Requeue a failed reconciliation after the configured delay
pub fn handle_reconciliation_error(
    obj: Arc<FallbackOrigin>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler>,
) -> Action {
    let name = obj.name_any();
    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.watch.reconciliation_error",
        resource.name = %name,
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {}: {}", name, error);
    observability::metrics::increment_reconciliation_errors();

    let delay = ctx.config.reconciliation_error_requeue_duration();
    debug!("Requeueing {} in {}s", name, delay.as_secs());
    Action::requeue(delay)
}

/// Class of an error surfaced by the controller stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// RBAC revoked or the service account token is invalid
    Unauthorized,
    /// Watch resource version expired, the watcher relists on its own
    Expired,
    /// API server is throttling or reinitializing storage
    Throttled,
    /// The object or the CRD disappeared
    NotFound,
    /// The reconciler failed; already reported by the error policy
    Reconciler,
    Other,
}

/// Classify a controller stream error from its rendered message
///
/// 404 is checked before 401, since plain-text 404 bodies surface as
/// deserialization errors that also mention the failed watch.
#[must_use]
pub fn classify_stream_error(error_string: &str) -> StreamErrorKind {
    let is_not_found = error_string.contains("ObjectNotFound")
        || error_string.contains("404")
        || error_string.contains("not found");
    let is_401 = (error_string.contains("401") || error_string.contains("Unauthorized"))
        && !is_not_found;

    if error_string.contains("ReconcilerFailed") {
        StreamErrorKind::Reconciler
    } else if is_401 {
        StreamErrorKind::Unauthorized
    } else if error_string.contains("410")
        || error_string.contains("too old resource version")
        || error_string.contains("Expired")
        || error_string.contains("Gone")
    {
        StreamErrorKind::Expired
    } else if error_string.contains("429")
        || error_string.contains("storage is (re)initializing")
        || error_string.contains("TooManyRequests")
    {
        StreamErrorKind::Throttled
    } else if is_not_found {
        StreamErrorKind::NotFound
    } else {
        StreamErrorKind::Other
    }
}

/// Log a controller stream error at a level matching its class
pub fn handle_stream_error(error_string: &str) {
    let error_span = tracing::span!(
        tracing::Level::WARN,
        "controller.watch.error",
        error = %error_string
    );
    let _error_guard = error_span.enter();

    match classify_stream_error(error_string) {
        StreamErrorKind::Reconciler => debug!("Reconciler error: {}", error_string),
        StreamErrorKind::Unauthorized => {
            error!("Watch authentication failed (401 Unauthorized) - RBAC may have been revoked or token expired");
            error!("Verify RBAC permissions are still active:");
            error!("   kubectl auth can-i watch fallbackorigins.sslsaas.cloudflare.crossplane.io --as=system:serviceaccount:<namespace>:fallback-origin-controller");
        }
        StreamErrorKind::Expired => {
            warn!("Watch resource version expired (410) - watch will restart");
        }
        StreamErrorKind::Throttled => {
            warn!("API server throttling or reinitializing (429): {}", error_string);
        }
        StreamErrorKind::NotFound => warn!(
            "Resource not found (404) - this may be normal if the resource was deleted or the CRD is missing. Error: {}",
            error_string
        ),
        StreamErrorKind::Other => error!("Controller stream error: {}", error_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_wins_over_unauthorized() {
        assert_eq!(
            classify_stream_error("WatchFailed: invalid type: integer `404`, Unauthorized"),
            StreamErrorKind::NotFound
        );
    }

    #[test]
    fn test_classifies_common_api_errors() {
        assert_eq!(
            classify_stream_error("ApiError: Unauthorized (401)"),
            StreamErrorKind::Unauthorized
        );
        assert_eq!(
            classify_stream_error("ApiError: too old resource version: 123 (410)"),
            StreamErrorKind::Expired
        );
        assert_eq!(
            classify_stream_error("ApiError: storage is (re)initializing (429)"),
            StreamErrorKind::Throttled
        );
        assert_eq!(
            classify_stream_error("connection reset by peer"),
            StreamErrorKind::Other
        );
    }

    #[test]
    fn test_reconciler_failures_are_recognised() {
        assert_eq!(
            classify_stream_error("ReconcilerFailed(External(NoZone), ObjectRef { .. })"),
            StreamErrorKind::Reconciler
        );
    }
}
