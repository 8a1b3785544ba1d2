//! # Controller
//!
//! Core controller modules for the Fallback Origin Controller.
//!
//! - `managed`: Resource-agnostic managed resource lifecycle
//! - `fallback_origin`: Lifecycle operations for `FallbackOrigin`
//! - `provider_config`: Credential resolution through `ProviderConfig`
//! - `reconciler`: Kubernetes reconciliation and status updates

pub mod fallback_origin;
pub mod managed;
pub mod provider_config;
pub mod reconciler;
