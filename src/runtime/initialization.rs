//! # Initialization
//!
//! Controller initialization logic including rustls setup, tracing,
//! metrics, server startup, and Kubernetes client setup.

use crate::config::ControllerConfig;
use crate::controller::reconciler::Reconciler;
use crate::crd::FallbackOrigin;
use crate::observability;
use crate::server::{start_server, ServerState};
use anyhow::{Context, Result};
use kube::api::{Api, ListParams};
use kube::Client;
use std::sync::Arc;
use tracing::{error, info};

/// Everything the watch loop needs
pub struct InitializationResult {
    /// API for the cluster-scoped FallbackOrigin CRD
    pub fallback_origins: Api<FallbackOrigin>,
    /// Reconciler context
    pub reconciler: Arc<Reconciler>,
    /// Server state for health checks
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("server_ready", &self.server_state.ready())
            .finish_non_exhaustive()
    }
}

/// Initialize the controller runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Metrics registration
/// - HTTP server startup
/// - Kubernetes client creation and CRD check
///
/// # Errors
/// Returns an error if any startup step fails
pub async fn initialize() -> Result<InitializationResult> {
    // Must happen before anything opens a TLS connection
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {e:?}"))?;

    observability::logging::init_tracing()?;

    info!("Starting Fallback Origin Controller");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    let config = ControllerConfig::from_env();
    info!(
        "Configuration: poll_interval={}s, error_requeue={}s, concurrency={}, endpoint={}",
        config.poll_interval_secs,
        config.reconciliation_error_requeue_secs,
        config.max_concurrent_reconciliations,
        config.cloudflare_api_endpoint
    );

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::default());
    let server_state_clone = Arc::clone(&server_state);
    let port = config.metrics_port;
    tokio::spawn(async move {
        if let Err(e) = start_server(port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let fallback_origins: Api<FallbackOrigin> = Api::all(client.clone());
    fallback_origins
        .list(&ListParams::default().limit(1))
        .await
        .context("FallbackOrigin CRD is not queryable - is it installed?")?;

    let reconciler = Arc::new(Reconciler::new(client, config));

    info!("Controller initialized, starting watch loop...");

    Ok(InitializationResult {
        fallback_origins,
        reconciler,
        server_state,
    })
}
