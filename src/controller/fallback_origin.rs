//! # FallbackOrigin External Client
//!
//! Connect, Observe, Create, Update and Delete for `FallbackOrigin`
//! managed resources against the Cloudflare fallback origin API.
//!
//! The fallback origin is a singleton per zone: Create and Update both set
//! it, and the zone ID doubles as the external name. The external name is
//! assigned the first time the fallback origin is seen to exist, whether
//! this controller created it or found it already in place.

use crate::config::ControllerConfig;
use crate::controller::managed::{
    Connector, ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate,
    ManagedResource,
};
use crate::controller::provider_config::{CredentialResolver, ProviderConfigError};
use crate::crd::{DeletionPolicy, FallbackOrigin, FallbackOriginStatus};
use crate::provider::cloudflare::fallback_origin::{
    generate_observation, is_fallback_origin_not_found, is_up_to_date,
};
use crate::provider::cloudflare::{ClientError, CloudflareClient};
use crate::provider::FallbackOriginApi;
use async_trait::async_trait;
use kube::ResourceExt;
use std::any::Any;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum Error {
    #[error("managed resource is not a FallbackOrigin custom resource (got {0})")]
    NotFallbackOrigin(&'static str),

    #[error("cannot get provider config: {0}")]
    ProviderConfig(#[from] ProviderConfigError),

    #[error("cannot create new Cloudflare client: {0}")]
    NewClient(#[source] ClientError),

    #[error("no zone found")]
    NoZone,

    #[error("cannot lookup fallback origin: {0}")]
    Lookup(#[source] ClientError),

    #[error("cannot create fallback origin: {0}")]
    Creation(#[source] ClientError),

    #[error("cannot update fallback origin: {0}")]
    Update(#[source] ClientError),

    #[error("cannot delete fallback origin: no external name")]
    DeletionNoExternalName,

    #[error("cannot delete fallback origin: {0}")]
    Deletion(#[source] ClientError),
}

impl ManagedResource for FallbackOrigin {
    fn kind(&self) -> &'static str {
        "FallbackOrigin"
    }

    fn resource_name(&self) -> String {
        self.name_any()
    }

    fn external_name(&self) -> Option<&str> {
        FallbackOrigin::external_name(self)
    }

    fn deletion_policy(&self) -> DeletionPolicy {
        self.spec.deletion_policy
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn as_fallback_origin(mr: &dyn ManagedResource) -> Result<&FallbackOrigin, Error> {
    let kind = mr.kind();
    mr.as_any()
        .downcast_ref::<FallbackOrigin>()
        .ok_or(Error::NotFallbackOrigin(kind))
}

fn as_fallback_origin_mut(mr: &mut dyn ManagedResource) -> Result<&mut FallbackOrigin, Error> {
    let kind = mr.kind();
    mr.as_any_mut()
        .downcast_mut::<FallbackOrigin>()
        .ok_or(Error::NotFallbackOrigin(kind))
}

fn zone_of(fo: &FallbackOrigin) -> Result<String, Error> {
    fo.spec
        .for_provider
        .zone
        .clone()
        .filter(|zone| !zone.is_empty())
        .ok_or(Error::NoZone)
}

/// Builds an authenticated Cloudflare client for each FallbackOrigin
#[derive(Debug, Clone)]
pub struct FallbackOriginConnector<R> {
    resolver: R,
    endpoint: String,
    timeout: Duration,
}

impl<R: CredentialResolver> FallbackOriginConnector<R> {
    #[must_use]
    pub fn new(resolver: R, config: &ControllerConfig) -> Self {
        Self {
            resolver,
            endpoint: config.cloudflare_api_endpoint.clone(),
            timeout: config.cloudflare_api_timeout(),
        }
    }
}

#[async_trait]
impl<R: CredentialResolver> Connector for FallbackOriginConnector<R> {
    type External = FallbackOriginExternal<CloudflareClient>;

    async fn connect(&self, mr: &dyn ManagedResource) -> Result<Self::External, Error> {
        let fo = as_fallback_origin(mr)?;
        let credentials = self.resolver.resolve(fo.provider_config_name()).await?;
        let client = CloudflareClient::new(credentials, self.endpoint.as_str(), self.timeout)
            .map_err(Error::NewClient)?;
        Ok(FallbackOriginExternal::new(client))
    }
}

/// External client for one FallbackOrigin
#[derive(Debug)]
pub struct FallbackOriginExternal<A> {
    api: A,
}

impl<A: FallbackOriginApi> FallbackOriginExternal<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: FallbackOriginApi> ExternalClient for FallbackOriginExternal<A> {
    type Error = Error;

    async fn observe(&self, mr: &mut dyn ManagedResource) -> Result<ExternalObservation, Error> {
        let fo = as_fallback_origin_mut(mr)?;
        let zone = zone_of(fo)?;

        let record = match self.api.fallback_origin(&zone).await {
            Ok(record) => record,
            Err(e) if is_fallback_origin_not_found(&e) => {
                debug!("Zone {} has no fallback origin", zone);
                return Ok(ExternalObservation::default());
            }
            Err(e) => return Err(Error::Lookup(e)),
        };

        let up_to_date = is_up_to_date(Some(&fo.spec.for_provider), &record);
        if fo.external_name().is_none() {
            debug!("Adopting existing fallback origin of zone {}", zone);
            fo.set_external_name(&zone);
        }
        fo.status
            .get_or_insert_with(FallbackOriginStatus::default)
            .at_provider = generate_observation(&record);

        Ok(ExternalObservation {
            resource_exists: true,
            resource_up_to_date: up_to_date,
        })
    }

    async fn create(&self, mr: &mut dyn ManagedResource) -> Result<ExternalCreation, Error> {
        let fo = as_fallback_origin_mut(mr)?;
        let zone = zone_of(fo)?;
        let origin = fo.spec.for_provider.origin.clone().unwrap_or_default();

        self.api
            .update_fallback_origin(&zone, &origin)
            .await
            .map_err(Error::Creation)?;
        info!("Created fallback origin '{}' for zone {}", origin, zone);

        let external_name = fo.external_name().is_none().then(|| zone.clone());
        if let Some(name) = &external_name {
            fo.set_external_name(name);
        }
        Ok(ExternalCreation { external_name })
    }

    async fn update(&self, mr: &mut dyn ManagedResource) -> Result<ExternalUpdate, Error> {
        let fo = as_fallback_origin_mut(mr)?;
        let zone = zone_of(fo)?;
        let origin = fo.spec.for_provider.origin.clone().unwrap_or_default();

        self.api
            .update_fallback_origin(&zone, &origin)
            .await
            .map_err(Error::Update)?;
        info!("Updated fallback origin of zone {} to '{}'", zone, origin);
        Ok(ExternalUpdate)
    }

    /// Deletes the fallback origin of the zone recorded as the external name
    async fn delete(&self, mr: &dyn ManagedResource) -> Result<(), Error> {
        let fo = as_fallback_origin(mr)?;
        let zone = fo.external_name().ok_or(Error::DeletionNoExternalName)?;

        self.api
            .delete_fallback_origin(zone)
            .await
            .map_err(Error::Deletion)?;
        info!("Deleted fallback origin of zone {}", zone);
        Ok(())
    }
}
