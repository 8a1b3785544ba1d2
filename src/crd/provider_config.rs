//! # ProviderConfig
//!
//! Cluster-scoped configuration pointing at the Secret that holds Cloudflare
//! API credentials.

use crate::crd::SecretKeySelector;
use serde::{Deserialize, Serialize};

/// ProviderConfig Custom Resource Definition
///
/// The referenced Secret key holds JSON, either `{"token": "..."}` or
/// `{"apiKey": "...", "email": "..."}`.
///
/// # Example
///
/// ```yaml
/// apiVersion: cloudflare.crossplane.io/v1alpha1
/// kind: ProviderConfig
/// metadata:
///   name: default
/// spec:
///   credentials:
///     source: Secret
///     secretRef:
///       namespace: crossplane-system
///       name: cloudflare-credentials
///       key: credentials
/// ```
#[derive(kube::CustomResource, Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "ProviderConfig",
    group = "cloudflare.crossplane.io",
    version = "v1alpha1",
    category = "crossplane",
    printcolumn = r#"{"name":"Secret-Name", "type":"string", "jsonPath":".spec.credentials.secretRef.name", "priority": 1}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigSpec {
    /// Where Cloudflare credentials are read from
    pub credentials: ProviderCredentials,
}

/// Credentials source for a ProviderConfig
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    /// Source of the credentials
    pub source: CredentialsSource,
    /// Secret key holding the credentials JSON (required for source Secret)
    #[serde(default)]
    pub secret_ref: Option<SecretKeySelector>,
}

/// Supported credential sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum CredentialsSource {
    Secret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_secret_source() {
        let pc: ProviderConfig = serde_json::from_value(serde_json::json!({
            "apiVersion": "cloudflare.crossplane.io/v1alpha1",
            "kind": "ProviderConfig",
            "metadata": { "name": "default" },
            "spec": {
                "credentials": {
                    "source": "Secret",
                    "secretRef": {
                        "namespace": "crossplane-system",
                        "name": "cloudflare-credentials",
                        "key": "credentials"
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(pc.spec.credentials.source, CredentialsSource::Secret);
        let secret_ref = pc.spec.credentials.secret_ref.unwrap();
        assert_eq!(secret_ref.name, "cloudflare-credentials");
        assert_eq!(secret_ref.key, "credentials");
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let result: Result<ProviderCredentials, _> =
            serde_json::from_value(serde_json::json!({ "source": "Environment" }));
        assert!(result.is_err());
    }
}
