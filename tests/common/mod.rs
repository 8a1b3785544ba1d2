//! Common test utilities for Pact integration tests
//!
//! Provides shared initialization code and fixtures for the Cloudflare
//! contract tests.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use fallback_origin_controller::crd::FallbackOrigin;
use pact_consumer::mock_server::ValidatingMockServer;
use std::sync::Once;

static RUSTLS_INIT: Once = Once::new();

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const API_TOKEN: &str = "test-token";

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` so it only runs once per test binary.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// Base URL of a Pact mock server without the trailing slash
pub fn base_url(mock_server: &dyn ValidatingMockServer) -> String {
    let mut base_url = mock_server.url().to_string();
    if base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Path of the fallback origin endpoint for the test zone
pub fn fallback_origin_path() -> String {
    format!("/zones/{ZONE_ID}/custom_hostnames/fallback_origin")
}

/// A FallbackOrigin for the test zone
pub fn fallback_origin(origin: Option<&str>) -> FallbackOrigin {
    let mut for_provider = serde_json::json!({ "zone": ZONE_ID });
    if let Some(origin) = origin {
        for_provider["origin"] = origin.into();
    }
    serde_json::from_value(serde_json::json!({
        "apiVersion": "sslsaas.cloudflare.crossplane.io/v1alpha1",
        "kind": "FallbackOrigin",
        "metadata": { "name": "example-zone-fallback" },
        "spec": { "forProvider": for_provider }
    }))
    .expect("valid FallbackOrigin")
}
