//! # Custom Resource Definitions
//!
//! CRD types for the Fallback Origin Controller.
//!
//! ## Module Structure
//!
//! - `fallback_origin.rs` - The `FallbackOrigin` managed resource
//! - `provider_config.rs` - The `ProviderConfig` holding Cloudflare credentials
//! - `common.rs` - References and policies shared by managed resources
//! - `status.rs` - Status conditions

mod common;
mod fallback_origin;
mod provider_config;
mod status;

// Re-export all public types
pub use common::{DeletionPolicy, ProviderConfigReference, SecretKeySelector};
pub use fallback_origin::{
    FallbackOrigin, FallbackOriginObservation, FallbackOriginParameters, FallbackOriginSpec,
    FallbackOriginStatus,
};
pub use provider_config::{
    CredentialsSource, ProviderConfig, ProviderConfigSpec, ProviderCredentials,
};
pub use status::{set_condition, Condition, ConditionReason, ConditionType};
