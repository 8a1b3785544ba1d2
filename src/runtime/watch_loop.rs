//! # Watch Loop
//!
//! Controller watch loop that monitors FallbackOrigin resources and triggers
//! reconciliation when changes are detected.

use crate::controller::reconciler::{reconcile, Reconciler};
use crate::crd::FallbackOrigin;
use crate::runtime::error_policy::{handle_reconciliation_error, handle_stream_error};
use crate::server::ServerState;
use futures::StreamExt;
use kube::api::Api;
use kube_runtime::{controller, watcher, Controller};
use std::sync::Arc;
use tracing::{debug, info, Instrument};

/// Run the controller until a shutdown signal arrives
///
/// The server reports ready while the controller is running.
pub async fn run_watch_loop(
    fallback_origins: Api<FallbackOrigin>,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) -> Result<(), anyhow::Error> {
    let concurrency = reconciler.config.max_concurrent_reconciliations;
    let watch_span = tracing::span!(
        tracing::Level::INFO,
        "controller.watch",
        operation = "watch_loop",
        concurrency = concurrency
    );

    info!("Starting controller watch loop...");
    server_state.set_ready(true);

    Controller::new(fallback_origins, watcher::Config::default().any_semantic())
        .with_config(controller::Config::default().concurrency(concurrency))
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, reconciler)
        .for_each(|result| async move {
            match result {
                Ok((obj, _action)) => debug!("Reconciled FallbackOrigin {}", obj.name),
                Err(e) => handle_stream_error(&format!("{e:?}")),
            }
        })
        .instrument(watch_span)
        .await;

    server_state.set_ready(false);
    info!("Controller watch loop stopped");
    Ok(())
}
