//! # Fallback Origin Controller
//!
//! A Kubernetes controller that manages the Cloudflare SSL for SaaS fallback
//! origin of a zone from cluster-scoped `FallbackOrigin` resources.
//!
//! Credentials come from a `ProviderConfig` that points at a Secret. Each
//! reconcile observes the zone's fallback origin, creates it when it is
//! missing, updates it when the origin differs and deletes it when the
//! resource is deleted (unless the deletion policy is `Orphan`).

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod provider;
pub mod runtime;
pub mod server;
