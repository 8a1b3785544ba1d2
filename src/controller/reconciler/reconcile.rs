//! # Reconciliation Logic
//!
//! Drives a `FallbackOrigin` through the managed resource lifecycle and
//! records the outcome on the resource.

use crate::controller::managed::{self, ManagedResource};
use crate::controller::reconciler::status::{
    apply_patches, deleting_status, finalized_status, patch_external_name, patch_status,
};
use crate::controller::reconciler::types::{Reconciler, ReconcilerError};
use crate::constants::MANAGED_RESOURCE_FINALIZER;
use crate::crd::FallbackOrigin;
use crate::observability::metrics;
use kube::api::Api;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use kube_runtime::finalizer::{finalizer, Event as FinalizerEvent};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// Main reconciliation function
///
/// Errors are turned into requeues by the error policy.
pub async fn reconcile(
    fo: Arc<FallbackOrigin>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let start = Instant::now();
    let name = fo.name_any();
    let span = tracing::info_span!(
        "reconcile",
        resource.name = %name,
        resource.kind = "FallbackOrigin",
        resource.zone = fo.spec.for_provider.zone.as_deref().unwrap_or("")
    );

    metrics::increment_reconciliations();
    let api: Api<FallbackOrigin> = Api::all(ctx.client.clone());

    let result = finalizer(&api, MANAGED_RESOURCE_FINALIZER, fo, |event| async {
        match event {
            FinalizerEvent::Apply(fo) => apply(&api, &ctx, &fo).await,
            FinalizerEvent::Cleanup(fo) => cleanup(&api, &ctx, &fo)
                .await
                .map(|()| Action::await_change()),
        }
    })
    .instrument(span)
    .await
    .map_err(ReconcilerError::from);

    metrics::observe_reconciliation_duration(start.elapsed().as_secs_f64());
    result
}

/// Converge a live FallbackOrigin
async fn apply(
    api: &Api<FallbackOrigin>,
    ctx: &Reconciler,
    fo: &FallbackOrigin,
) -> Result<Action, ReconcilerError> {
    let name = fo.name_any();
    let mut working = fo.clone();

    let outcome = managed::converge(&ctx.connector(), &mut working).await;
    let patches = apply_patches(fo, &working, &outcome);

    if let Some(external_name) = &patches.external_name {
        patch_external_name(api, &name, external_name).await?;
    }

    match outcome {
        Ok(convergence) => {
            patch_status(api, fo, patches.status).await?;

            metrics::increment_lifecycle_action(convergence.action());
            match convergence {
                managed::Convergence::UpToDate => {
                    debug!("FallbackOrigin {} is up to date", name);
                }
                _ => info!(
                    "FallbackOrigin {} reconciled (action: {})",
                    name,
                    convergence.action()
                ),
            }
            Ok(Action::requeue(ctx.config.poll_interval()))
        }
        Err(e) => {
            warn!("Failed to reconcile FallbackOrigin {}: {}", name, e);
            if let Err(patch_err) = patch_status(api, fo, patches.status).await {
                warn!("Failed to record error on {}: {}", name, patch_err);
            }
            Err(e.into())
        }
    }
}

/// Release the external resource of a FallbackOrigin being deleted
async fn cleanup(
    api: &Api<FallbackOrigin>,
    ctx: &Reconciler,
    fo: &FallbackOrigin,
) -> Result<(), ReconcilerError> {
    let name = fo.name_any();
    info!(
        "Finalizing FallbackOrigin {} (deletion policy: {:?})",
        name,
        fo.deletion_policy()
    );

    let deleting = deleting_status(fo);
    if let Err(e) = patch_status(api, fo, deleting.clone()).await {
        debug!("Could not mark {} as deleting: {}", name, e);
    }
    let mut working = fo.clone();
    working.status = Some(deleting);

    let outcome = managed::finalize(&ctx.connector(), &mut working).await;
    if let Some(status) = finalized_status(&working, &outcome) {
        if let Err(patch_err) = patch_status(api, fo, status).await {
            warn!("Failed to record error on {}: {}", name, patch_err);
        }
    }

    match outcome {
        Ok(finalization) => {
            metrics::increment_lifecycle_action(finalization.action());
            info!(
                "FallbackOrigin {} finalized (action: {})",
                name,
                finalization.action()
            );
            Ok(())
        }
        Err(e) => {
            warn!("Failed to finalize FallbackOrigin {}: {}", name, e);
            Err(e.into())
        }
    }
}
