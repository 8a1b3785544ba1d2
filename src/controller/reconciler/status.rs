//! # Status Updates
//!
//! Computes the `FallbackOrigin` status after a reconcile and writes it, and
//! the external-name annotation, back to the API server.

use crate::constants::EXTERNAL_NAME_ANNOTATION;
use crate::controller::managed::{Convergence, Finalization};
use crate::crd::{set_condition, Condition, FallbackOrigin, FallbackOriginStatus};
use kube::api::{Api, Patch, PatchParams};
use std::fmt::Display;
use tracing::debug;

/// Writes recording the outcome of converging a live resource
#[derive(Debug, Clone)]
pub struct ApplyPatches {
    /// External name to annotate, when the stored resource lacks it
    pub external_name: Option<String>,
    pub status: FallbackOriginStatus,
}

/// Decide what to write back after a converge
///
/// `stored` is the resource as read from the API server, `working` the copy
/// the external client worked on. An external name assigned on `working` is
/// written even when the converge failed afterwards, so it is not lost.
#[must_use]
pub fn apply_patches<E: Display>(
    stored: &FallbackOrigin,
    working: &FallbackOrigin,
    outcome: &Result<Convergence, E>,
) -> ApplyPatches {
    let external_name = working
        .external_name()
        .filter(|name| stored.external_name() != Some(*name))
        .map(str::to_string);
    let status = match outcome {
        Ok(convergence) => converged_status(working, convergence),
        Err(e) => failed_status(working, &e.to_string()),
    };
    ApplyPatches {
        external_name,
        status,
    }
}

/// Status to write once finalization has run
///
/// `working` already carries the Deleting condition written before
/// finalization. `None` when finalization succeeded, since the finalizer is
/// released and the resource goes away.
#[must_use]
pub fn finalized_status<E: Display>(
    working: &FallbackOrigin,
    outcome: &Result<Finalization, E>,
) -> Option<FallbackOriginStatus> {
    match outcome {
        Ok(_) => None,
        Err(e) => Some(failed_status(working, &e.to_string())),
    }
}

/// Status after a successful converge
///
/// `observed` is the resource as left by the external client, carrying the
/// latest `atProvider`.
#[must_use]
pub fn converged_status(observed: &FallbackOrigin, convergence: &Convergence) -> FallbackOriginStatus {
    let mut status = observed.status.clone().unwrap_or_default();
    let ready = match convergence {
        Convergence::Created { .. } => Condition::creating(),
        Convergence::Updated | Convergence::UpToDate => Condition::available(),
    };
    set_condition(&mut status.conditions, ready);
    set_condition(&mut status.conditions, Condition::reconcile_success());
    status.observed_generation = observed.metadata.generation;
    status
}

/// Status after a failed reconcile; readiness is left as it was
#[must_use]
pub fn failed_status(observed: &FallbackOrigin, message: &str) -> FallbackOriginStatus {
    let mut status = observed.status.clone().unwrap_or_default();
    set_condition(&mut status.conditions, Condition::reconcile_error(message));
    status.observed_generation = observed.metadata.generation;
    status
}

/// Status while the external resource is being released
#[must_use]
pub fn deleting_status(observed: &FallbackOrigin) -> FallbackOriginStatus {
    let mut status = observed.status.clone().unwrap_or_default();
    set_condition(&mut status.conditions, Condition::deleting());
    status
}

/// Merge-patch the status subresource
///
/// Skipped when nothing changed, so the write does not trigger another
/// watch event.
///
/// # Errors
/// Returns the API server error if the patch fails
pub async fn patch_status(
    api: &Api<FallbackOrigin>,
    current: &FallbackOrigin,
    status: FallbackOriginStatus,
) -> Result<(), kube::Error> {
    let name = kube::ResourceExt::name_any(current);
    if current.status.as_ref().is_some_and(|s| same_status(s, &status)) {
        debug!("Skipping status update for {} - unchanged", name);
        return Ok(());
    }

    let patch = serde_json::json!({ "status": status });
    api.patch_status(&name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;
    Ok(())
}

/// Record the external name on the resource's annotations
///
/// # Errors
/// Returns the API server error if the patch fails
pub async fn patch_external_name(
    api: &Api<FallbackOrigin>,
    name: &str,
    external_name: &str,
) -> Result<(), kube::Error> {
    let patch = serde_json::json!({
        "metadata": {
            "annotations": { EXTERNAL_NAME_ANNOTATION: external_name }
        }
    });
    api.patch(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;
    debug!("Recorded external name {} on {}", external_name, name);
    Ok(())
}

fn same_status(a: &FallbackOriginStatus, b: &FallbackOriginStatus) -> bool {
    a.at_provider == b.at_provider
        && a.observed_generation == b.observed_generation
        && a.conditions.len() == b.conditions.len()
        && a.conditions
            .iter()
            .zip(&b.conditions)
            .all(|(x, y)| x.equivalent(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{ConditionReason, ConditionType};

    fn resource(status: Option<FallbackOriginStatus>) -> FallbackOrigin {
        let mut fo: FallbackOrigin = serde_json::from_value(serde_json::json!({
            "apiVersion": "sslsaas.cloudflare.crossplane.io/v1alpha1",
            "kind": "FallbackOrigin",
            "metadata": { "name": "example", "generation": 3 },
            "spec": { "forProvider": { "zone": "zone-1" } }
        }))
        .unwrap();
        fo.status = status;
        fo
    }

    fn condition(status: &FallbackOriginStatus, t: ConditionType) -> &Condition {
        status.conditions.iter().find(|c| c.r#type == t).unwrap()
    }

    #[test]
    fn test_created_is_not_ready_yet() {
        let status = converged_status(
            &resource(None),
            &Convergence::Created {
                external_name: Some("zone-1".to_string()),
            },
        );
        let ready = condition(&status, ConditionType::Ready);
        assert_eq!(ready.status, "False");
        assert_eq!(ready.reason, ConditionReason::Creating);
        assert_eq!(condition(&status, ConditionType::Synced).status, "True");
        assert_eq!(status.observed_generation, Some(3));
    }

    #[test]
    fn test_up_to_date_is_available() {
        let status = converged_status(&resource(None), &Convergence::UpToDate);
        let ready = condition(&status, ConditionType::Ready);
        assert_eq!(ready.status, "True");
        assert_eq!(ready.reason, ConditionReason::Available);
    }

    #[test]
    fn test_failure_keeps_readiness() {
        let previous = converged_status(&resource(None), &Convergence::UpToDate);
        let status = failed_status(&resource(Some(previous)), "cannot lookup fallback origin");
        assert_eq!(condition(&status, ConditionType::Ready).status, "True");
        let synced = condition(&status, ConditionType::Synced);
        assert_eq!(synced.status, "False");
        assert_eq!(synced.reason, ConditionReason::ReconcileError);
        assert_eq!(
            synced.message.as_deref(),
            Some("cannot lookup fallback origin")
        );
    }

    #[test]
    fn test_deleting_marks_ready_false() {
        let status = deleting_status(&resource(None));
        assert_eq!(
            condition(&status, ConditionType::Ready).reason,
            ConditionReason::Deleting
        );
    }

    fn annotated(mut fo: FallbackOrigin, external_name: &str) -> FallbackOrigin {
        fo.set_external_name(external_name);
        fo
    }

    #[test]
    fn test_apply_patches_records_new_external_name() {
        let stored = resource(None);
        let working = annotated(resource(None), "zone-1");
        let patches = apply_patches::<String>(
            &stored,
            &working,
            &Ok(Convergence::Created {
                external_name: Some("zone-1".to_string()),
            }),
        );
        assert_eq!(patches.external_name.as_deref(), Some("zone-1"));
    }

    #[test]
    fn test_apply_patches_records_external_name_of_existing_resource() {
        let stored = resource(None);
        let working = annotated(resource(None), "zone-1");
        let patches = apply_patches::<String>(&stored, &working, &Ok(Convergence::UpToDate));
        assert_eq!(patches.external_name.as_deref(), Some("zone-1"));
        assert_eq!(
            condition(&patches.status, ConditionType::Ready).reason,
            ConditionReason::Available
        );
    }

    #[test]
    fn test_apply_patches_skips_recorded_external_name() {
        let stored = annotated(resource(None), "zone-1");
        let working = stored.clone();
        let patches = apply_patches::<String>(&stored, &working, &Ok(Convergence::Updated));
        assert_eq!(patches.external_name, None);
    }

    #[test]
    fn test_apply_patches_on_error_marks_unsynced_and_keeps_external_name() {
        let stored = resource(None);
        let working = annotated(resource(None), "zone-1");
        let patches = apply_patches(
            &stored,
            &working,
            &Err::<Convergence, _>("cannot update fallback origin: boom"),
        );
        assert_eq!(patches.external_name.as_deref(), Some("zone-1"));
        let synced = condition(&patches.status, ConditionType::Synced);
        assert_eq!(synced.status, "False");
        assert_eq!(
            synced.message.as_deref(),
            Some("cannot update fallback origin: boom")
        );
    }

    #[test]
    fn test_finalized_status_only_on_error() {
        let mut working = resource(None);
        working.status = Some(deleting_status(&working));

        assert!(finalized_status::<String>(&working, &Ok(Finalization::Deleted)).is_none());

        let status =
            finalized_status(&working, &Err::<Finalization, _>("cannot delete fallback origin"))
                .unwrap();
        assert_eq!(
            condition(&status, ConditionType::Ready).reason,
            ConditionReason::Deleting
        );
        assert_eq!(condition(&status, ConditionType::Synced).status, "False");
    }

    #[test]
    fn test_same_status_ignores_transition_time() {
        let a = converged_status(&resource(None), &Convergence::UpToDate);
        let mut b = a.clone();
        for c in &mut b.conditions {
            c.last_transition_time = Some("2020-01-01T00:00:00Z".to_string());
        }
        assert!(same_status(&a, &b));

        b.observed_generation = Some(4);
        assert!(!same_status(&a, &b));
    }
}
