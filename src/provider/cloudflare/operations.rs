//! # Fallback Origin Operations
//!
//! Implementation of [`FallbackOriginApi`] for the Cloudflare REST client.

use super::requests::{fallback_origin_path, UpdateFallbackOriginRequest};
use super::{ClientError, CloudflareClient, FallbackOriginRecord};
use crate::observability::metrics;
use crate::provider::FallbackOriginApi;
use async_trait::async_trait;
use reqwest::Method;
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};

/// Metric label for the outcome of a call
fn result_label<T>(result: &Result<T, ClientError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(ClientError::NotFound { .. }) => "not_found",
        Err(_) => "error",
    }
}

#[async_trait]
impl FallbackOriginApi for CloudflareClient {
    async fn fallback_origin(&self, zone_id: &str) -> Result<FallbackOriginRecord, ClientError> {
        let span = info_span!("cloudflare.fallback_origin.get", zone.id = zone_id);
        async move {
            let start = Instant::now();
            let request = self.make_request(Method::GET, &fallback_origin_path(zone_id));
            let result = self
                .send::<FallbackOriginRecord>(request)
                .await
                .and_then(|record| {
                    record.ok_or_else(|| ClientError::Decode {
                        status: 200,
                        message: "response did not include a result".to_string(),
                    })
                });
            metrics::record_external_operation(
                "get",
                result_label(&result),
                start.elapsed().as_secs_f64(),
            );
            if let Ok(record) = &result {
                debug!(
                    "Fallback origin for zone {} is '{}' ({})",
                    zone_id, record.origin, record.status
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update_fallback_origin(
        &self,
        zone_id: &str,
        origin: &str,
    ) -> Result<FallbackOriginRecord, ClientError> {
        let span = info_span!(
            "cloudflare.fallback_origin.update",
            zone.id = zone_id,
            origin = origin
        );
        async move {
            let start = Instant::now();
            info!("Setting fallback origin of zone {} to '{}'", zone_id, origin);
            let request = self
                .make_request(Method::PUT, &fallback_origin_path(zone_id))
                .json(&UpdateFallbackOriginRequest { origin });
            let result = self
                .send::<FallbackOriginRecord>(request)
                .await
                .map(Option::unwrap_or_default);
            metrics::record_external_operation(
                "update",
                result_label(&result),
                start.elapsed().as_secs_f64(),
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_fallback_origin(&self, zone_id: &str) -> Result<(), ClientError> {
        let span = info_span!("cloudflare.fallback_origin.delete", zone.id = zone_id);
        async move {
            let start = Instant::now();
            info!("Deleting fallback origin of zone {}", zone_id);
            let request = self.make_request(Method::DELETE, &fallback_origin_path(zone_id));
            let result = self
                .send::<serde_json::Value>(request)
                .await
                .map(|_| ());
            metrics::record_external_operation(
                "delete",
                result_label(&result),
                start.elapsed().as_secs_f64(),
            );
            result
        }
        .instrument(span)
        .await
    }
}
