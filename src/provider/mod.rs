//! # Provider Modules
//!
//! Clients for the external APIs managed resources are reconciled against.
//!
//! Each API is exposed to the reconciler through a narrow trait so the
//! lifecycle logic can be exercised without network access.

use async_trait::async_trait;

pub mod cloudflare;

use cloudflare::{ClientError, FallbackOriginRecord};

/// Cloudflare SSL for SaaS fallback origin endpoints
///
/// Every call is a single request: no retries, no caching. The fallback
/// origin is a zone singleton, so there is no separate create; `update`
/// is an upsert.
#[async_trait]
pub trait FallbackOriginApi: Send + Sync {
    /// Fetch the fallback origin of a zone
    async fn fallback_origin(&self, zone_id: &str) -> Result<FallbackOriginRecord, ClientError>;

    /// Create or replace the fallback origin of a zone
    async fn update_fallback_origin(
        &self,
        zone_id: &str,
        origin: &str,
    ) -> Result<FallbackOriginRecord, ClientError>;

    /// Delete the fallback origin of a zone
    async fn delete_fallback_origin(&self, zone_id: &str) -> Result<(), ClientError>;
}
