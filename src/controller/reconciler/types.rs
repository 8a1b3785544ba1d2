//! # Reconciler Types
//!
//! Shared context and error type for the FallbackOrigin reconciler.

use crate::config::ControllerConfig;
use crate::controller::fallback_origin::{self, FallbackOriginConnector};
use crate::controller::provider_config::KubeCredentialResolver;
use kube::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("{0}")]
    External(#[from] fallback_origin::Error),

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Finalizer error: {0}")]
    Finalizer(String),
}

impl From<kube_runtime::finalizer::Error<ReconcilerError>> for ReconcilerError {
    fn from(e: kube_runtime::finalizer::Error<ReconcilerError>) -> Self {
        match e {
            kube_runtime::finalizer::Error::ApplyFailed(inner)
            | kube_runtime::finalizer::Error::CleanupFailed(inner) => inner,
            other => ReconcilerError::Finalizer(other.to_string()),
        }
    }
}

/// Context shared by every reconciliation
pub struct Reconciler {
    pub client: Client,
    pub config: ControllerConfig,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(client: Client, config: ControllerConfig) -> Self {
        Self { client, config }
    }

    /// Connector resolving credentials through this reconciler's client
    #[must_use]
    pub fn connector(&self) -> FallbackOriginConnector<KubeCredentialResolver> {
        FallbackOriginConnector::new(KubeCredentialResolver::new(self.client.clone()), &self.config)
    }
}
