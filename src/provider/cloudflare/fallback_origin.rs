//! # Fallback Origin Domain Logic
//!
//! Translation between `FallbackOrigin` parameters and the Cloudflare
//! representation. Everything here is pure.

use super::{ClientError, FallbackOriginRecord};
use crate::constants::FALLBACK_ORIGIN_NOT_FOUND_CODE;
use crate::crd::{FallbackOriginObservation, FallbackOriginParameters};

/// Project the remote fallback origin onto the observation stored in status
#[must_use]
pub fn generate_observation(record: &FallbackOriginRecord) -> FallbackOriginObservation {
    FallbackOriginObservation {
        status: Some(record.status.clone()).filter(|s| !s.is_empty()),
        errors: record.errors.clone(),
    }
}

/// Whether the remote fallback origin matches the desired parameters
///
/// Only `origin` is compared. An unset desired origin is "don't care", and
/// so is an empty remote origin.
#[must_use]
pub fn is_up_to_date(
    params: Option<&FallbackOriginParameters>,
    record: &FallbackOriginRecord,
) -> bool {
    let Some(params) = params else {
        return true;
    };
    match params.origin.as_deref() {
        Some(desired) if !record.origin.is_empty() => desired == record.origin,
        _ => true,
    }
}

/// Whether an error means the zone has no fallback origin
///
/// The client already classifies Cloudflare's not-found code into
/// [`ClientError::NotFound`]; errors from elsewhere are matched on the code
/// appearing in their message.
#[must_use]
pub fn is_fallback_origin_not_found(err: &(dyn std::error::Error + 'static)) -> bool {
    matches!(
        err.downcast_ref::<ClientError>(),
        Some(ClientError::NotFound { .. })
    ) || err.to_string().contains(FALLBACK_ORIGIN_NOT_FOUND_CODE)
}
