//! FallbackOrigin lifecycle against a Pact mock of the Cloudflare API
//!
//! Drives `FallbackOriginExternal` over a real `CloudflareClient`, checking
//! what each lifecycle operation sends and how responses land on the
//! resource.

mod common;

use common::{base_url, fallback_origin, fallback_origin_path, init_rustls, API_TOKEN, ZONE_ID};
use fallback_origin_controller::controller::fallback_origin::{Error, FallbackOriginExternal};
use fallback_origin_controller::controller::managed::ExternalClient;
use fallback_origin_controller::provider::cloudflare::{CloudflareClient, Credentials};
use pact_consumer::prelude::*;
use serde_json::json;
use std::time::Duration;

fn external(base_url: &str) -> FallbackOriginExternal<CloudflareClient> {
    let client = CloudflareClient::new(
        Credentials::Token(API_TOKEN.to_string()),
        base_url,
        Duration::from_secs(5),
    )
    .expect("Failed to build client");
    FallbackOriginExternal::new(client)
}

#[tokio::test]
async fn test_observe_missing_fallback_origin() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Fallback-Origin-Controller", "Cloudflare-API");
    pact_builder.interaction("observe a zone without a fallback origin", "", |mut i| {
        i.given("the zone has no fallback origin");
        i.request.method("GET").path(fallback_origin_path());
        i.response
            .status(404)
            .header("content-type", "application/json")
            .json_body(json!({
                "success": false,
                "errors": [{ "code": 1551, "message": "No fallback origin found." }],
                "messages": [],
                "result": null
            }));
        i
    });
    let mock_server = pact_builder.start_mock_server(None, None);

    let mut fo = fallback_origin(Some("fallback.example.com"));
    let observation = external(&base_url(mock_server.as_ref()))
        .observe(&mut fo)
        .await
        .expect("observe should succeed");

    assert!(!observation.resource_exists);
}

#[tokio::test]
async fn test_observe_stale_fallback_origin() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Fallback-Origin-Controller", "Cloudflare-API");
    pact_builder.interaction("observe a zone with a different fallback origin", "", |mut i| {
        i.given("the zone has an active fallback origin");
        i.request.method("GET").path(fallback_origin_path());
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": {
                    "origin": "old.example.com",
                    "status": "active",
                    "errors": ["DNS records are not setup correctly"]
                }
            }));
        i
    });
    let mock_server = pact_builder.start_mock_server(None, None);

    let mut fo = fallback_origin(Some("new.example.com"));
    let observation = external(&base_url(mock_server.as_ref()))
        .observe(&mut fo)
        .await
        .expect("observe should succeed");

    assert!(observation.resource_exists);
    assert!(!observation.resource_up_to_date);
    assert_eq!(fo.external_name(), Some(ZONE_ID));
    let at_provider = &fo.status.as_ref().expect("status recorded").at_provider;
    assert_eq!(at_provider.status.as_deref(), Some("active"));
    assert_eq!(
        at_provider.errors,
        vec!["DNS records are not setup correctly".to_string()]
    );
}

#[tokio::test]
async fn test_observe_surfaces_api_errors() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Fallback-Origin-Controller", "Cloudflare-API");
    pact_builder.interaction("observe with a revoked token", "", |mut i| {
        i.given("the token is not authorized for the zone");
        i.request.method("GET").path(fallback_origin_path());
        i.response
            .status(403)
            .header("content-type", "application/json")
            .json_body(json!({
                "success": false,
                "errors": [{ "code": 10000, "message": "Authentication error" }],
                "messages": [],
                "result": null
            }));
        i
    });
    let mock_server = pact_builder.start_mock_server(None, None);

    let mut fo = fallback_origin(Some("fallback.example.com"));
    let err = external(&base_url(mock_server.as_ref()))
        .observe(&mut fo)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Lookup(_)), "got {err:?}");
    assert!(err.to_string().contains("Authentication error"));
}

#[tokio::test]
async fn test_create_sets_external_name() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Fallback-Origin-Controller", "Cloudflare-API");
    pact_builder.interaction("create the fallback origin of a zone", "", |mut i| {
        i.given("the zone has no fallback origin");
        i.request
            .method("PUT")
            .path(fallback_origin_path())
            .json_body(json!({ "origin": "fallback.example.com" }));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": { "origin": "fallback.example.com", "status": "pending_deployment", "errors": [] }
            }));
        i
    });
    let mock_server = pact_builder.start_mock_server(None, None);

    let mut fo = fallback_origin(Some("fallback.example.com"));
    let creation = external(&base_url(mock_server.as_ref()))
        .create(&mut fo)
        .await
        .expect("create should succeed");

    assert_eq!(creation.external_name.as_deref(), Some(ZONE_ID));
    assert_eq!(fo.external_name(), Some(ZONE_ID));
}

#[tokio::test]
async fn test_delete_removes_fallback_origin() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Fallback-Origin-Controller", "Cloudflare-API");
    pact_builder.interaction("delete the fallback origin of a zone", "", |mut i| {
        i.given("the zone has an active fallback origin");
        i.request.method("DELETE").path(fallback_origin_path());
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "success": true, "errors": [], "messages": [], "result": null }));
        i
    });
    let mock_server = pact_builder.start_mock_server(None, None);

    let mut fo = fallback_origin(Some("fallback.example.com"));
    fo.set_external_name(ZONE_ID);
    external(&base_url(mock_server.as_ref()))
        .delete(&fo)
        .await
        .expect("delete should succeed");
}
