//! # Managed Resource Lifecycle
//!
//! Resource-agnostic reconciliation of an external resource.
//!
//! A resource type plugs in by implementing [`Connector`] (build an
//! authenticated client for one managed resource) and [`ExternalClient`]
//! (observe, create, update and delete the external resource). The driver
//! functions [`converge`] and [`finalize`] decide which of those calls to
//! make; persisting the outcome to Kubernetes is the caller's job.
//!
//! ## Flow
//!
//! 1. Connect
//! 2. Observe
//! 3. Create when the resource does not exist, Update when it is stale,
//!    or Delete when the managed resource is being deleted

use crate::crd::DeletionPolicy;
use async_trait::async_trait;
use std::any::Any;

/// The Kubernetes side of an external resource
pub trait ManagedResource: Any + Send + Sync {
    /// Kind of the custom resource, used in errors and logs
    fn kind(&self) -> &'static str;

    /// Name of the custom resource
    fn resource_name(&self) -> String;

    /// Identifier of the external resource, once one is assigned
    fn external_name(&self) -> Option<&str>;

    /// What to do with the external resource when the managed resource goes away
    fn deletion_policy(&self) -> DeletionPolicy;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Result of observing the external resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExternalObservation {
    /// The external resource exists
    pub resource_exists: bool,
    /// The external resource matches the desired state
    pub resource_up_to_date: bool,
}

/// Result of creating the external resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalCreation {
    /// External name to record on the managed resource, if it has none yet
    pub external_name: Option<String>,
}

/// Result of updating the external resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExternalUpdate;

/// Operations on one external resource, bound to an authenticated client
#[async_trait]
pub trait ExternalClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the external resource and record what was seen on `mr`
    async fn observe(
        &self,
        mr: &mut dyn ManagedResource,
    ) -> Result<ExternalObservation, Self::Error>;

    async fn create(&self, mr: &mut dyn ManagedResource) -> Result<ExternalCreation, Self::Error>;

    async fn update(&self, mr: &mut dyn ManagedResource) -> Result<ExternalUpdate, Self::Error>;

    async fn delete(&self, mr: &dyn ManagedResource) -> Result<(), Self::Error>;
}

/// Produces an [`ExternalClient`] for a managed resource
#[async_trait]
pub trait Connector: Send + Sync {
    type External: ExternalClient;

    async fn connect(
        &self,
        mr: &dyn ManagedResource,
    ) -> Result<Self::External, <Self::External as ExternalClient>::Error>;
}

/// Error type of a connector's external client
pub type ConnectorError<C> = <<C as Connector>::External as ExternalClient>::Error;

/// What [`converge`] did to the external resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Convergence {
    /// The external resource did not exist and was created
    Created { external_name: Option<String> },
    /// The external resource was stale and was updated
    Updated,
    /// Nothing to do
    UpToDate,
}

impl Convergence {
    /// Metric and log label
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "create",
            Self::Updated => "update",
            Self::UpToDate => "none",
        }
    }
}

/// What [`finalize`] did to the external resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalization {
    /// The external resource was deleted
    Deleted,
    /// There was nothing to delete
    AlreadyAbsent,
    /// The deletion policy kept the external resource
    Orphaned,
}

impl Finalization {
    /// Metric and log label
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Deleted => "delete",
            Self::AlreadyAbsent => "none",
            Self::Orphaned => "orphan",
        }
    }
}

/// Bring the external resource in line with a live managed resource
///
/// # Errors
/// Returns the first error from Connect, Observe, Create or Update
pub async fn converge<C: Connector>(
    connector: &C,
    mr: &mut dyn ManagedResource,
) -> Result<Convergence, ConnectorError<C>> {
    let external = connector.connect(mr).await?;
    let observation = external.observe(mr).await?;

    if !observation.resource_exists {
        let creation = external.create(mr).await?;
        return Ok(Convergence::Created {
            external_name: creation.external_name,
        });
    }

    if !observation.resource_up_to_date {
        external.update(mr).await?;
        return Ok(Convergence::Updated);
    }

    Ok(Convergence::UpToDate)
}

/// Release the external resource of a managed resource that is being deleted
///
/// Observe assigns an external name as soon as the external resource is
/// seen, so a managed resource without one never created or found
/// anything and there is nothing to delete.
///
/// # Errors
/// Returns the first error from Connect, Observe or Delete
pub async fn finalize<C: Connector>(
    connector: &C,
    mr: &mut dyn ManagedResource,
) -> Result<Finalization, ConnectorError<C>> {
    if mr.deletion_policy() == DeletionPolicy::Orphan {
        return Ok(Finalization::Orphaned);
    }
    if mr.external_name().is_none() {
        return Ok(Finalization::AlreadyAbsent);
    }

    let external = connector.connect(mr).await?;
    let observation = external.observe(mr).await?;
    if !observation.resource_exists {
        return Ok(Finalization::AlreadyAbsent);
    }

    external.delete(mr).await?;
    Ok(Finalization::Deleted)
}
