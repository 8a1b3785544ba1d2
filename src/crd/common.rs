//! # Shared Managed Resource Types
//!
//! Types embedded in every managed resource spec.

use crate::constants::DEFAULT_PROVIDER_CONFIG_NAME;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to the ProviderConfig supplying credentials for a managed resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigReference {
    /// Name of the cluster-scoped ProviderConfig
    pub name: String,
}

impl Default for ProviderConfigReference {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROVIDER_CONFIG_NAME.to_string(),
        }
    }
}

/// What happens to the external resource when the managed resource is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum DeletionPolicy {
    /// Delete the external resource (default)
    #[default]
    Delete,
    /// Leave the external resource in place and only release the managed resource
    Orphan,
}

/// Selects a key of a Secret in a given namespace
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Namespace of the Secret
    pub namespace: String,
    /// Name of the Secret
    pub name: String,
    /// Key within the Secret's data
    pub key: String,
}
