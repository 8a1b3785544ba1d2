//! # FallbackOrigin
//!
//! Managed resource describing the SSL for SaaS fallback origin of a
//! Cloudflare zone.

use crate::constants::EXTERNAL_NAME_ANNOTATION;
use crate::crd::{Condition, DeletionPolicy, ProviderConfigReference};
use kube::ResourceExt;
use serde::{Deserialize, Serialize};

/// FallbackOrigin Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: sslsaas.cloudflare.crossplane.io/v1alpha1
/// kind: FallbackOrigin
/// metadata:
///   name: example-zone-fallback
/// spec:
///   forProvider:
///     zone: 023e105f4ecef8ad9ca31a8372d0c353
///     origin: fallback.example.com
///   providerConfigRef:
///     name: default
/// ```
#[derive(kube::CustomResource, Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "FallbackOrigin",
    group = "sslsaas.cloudflare.crossplane.io",
    version = "v1alpha1",
    status = "FallbackOriginStatus",
    category = "crossplane",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}, {"name":"Synced", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}, {"name":"Zone", "type":"string", "jsonPath":".spec.forProvider.zone"}, {"name":"Origin", "type":"string", "jsonPath":".spec.forProvider.origin"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct FallbackOriginSpec {
    /// Desired state of the fallback origin
    pub for_provider: FallbackOriginParameters,
    /// ProviderConfig supplying Cloudflare credentials
    /// Defaults to the ProviderConfig named "default"
    #[serde(default)]
    pub provider_config_ref: Option<ProviderConfigReference>,
    /// Whether deleting this resource deletes the fallback origin in Cloudflare
    #[serde(default)]
    pub deletion_policy: DeletionPolicy,
}

/// Desired fallback origin parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FallbackOriginParameters {
    /// Zone ID the fallback origin belongs to. Immutable once created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Hostname custom hostnames fall back to when they have no origin of their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Fallback origin state last reported by Cloudflare
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FallbackOriginObservation {
    /// Deployment status, e.g. "active", "pending_deployment"
    #[serde(default)]
    pub status: Option<String>,
    /// Errors Cloudflare reports against the fallback origin
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Status of the FallbackOrigin resource
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FallbackOriginStatus {
    /// Observed remote state
    #[serde(default)]
    pub at_provider: FallbackOriginObservation,
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Generation of the spec the status was computed from
    #[serde(default)]
    pub observed_generation: Option<i64>,
}

impl FallbackOrigin {
    /// External name annotation, if one has been assigned
    #[must_use]
    pub fn external_name(&self) -> Option<&str> {
        self.annotations()
            .get(EXTERNAL_NAME_ANNOTATION)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Set the external name annotation
    pub fn set_external_name(&mut self, name: &str) {
        self.annotations_mut()
            .insert(EXTERNAL_NAME_ANNOTATION.to_string(), name.to_string());
    }

    /// Name of the ProviderConfig this resource authenticates with
    #[must_use]
    pub fn provider_config_name(&self) -> &str {
        self.spec
            .provider_config_ref
            .as_ref()
            .map_or(crate::constants::DEFAULT_PROVIDER_CONFIG_NAME, |r| {
                r.name.as_str()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::CustomResourceExt;

    fn sample() -> FallbackOrigin {
        serde_json::from_value(serde_json::json!({
            "apiVersion": "sslsaas.cloudflare.crossplane.io/v1alpha1",
            "kind": "FallbackOrigin",
            "metadata": { "name": "example" },
            "spec": {
                "forProvider": { "zone": "zone-1", "origin": "fallback.example.com" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let fo = sample();
        assert_eq!(fo.spec.for_provider.zone.as_deref(), Some("zone-1"));
        assert_eq!(fo.spec.deletion_policy, DeletionPolicy::Delete);
        assert_eq!(fo.provider_config_name(), "default");
        assert!(fo.status.is_none());
    }

    #[test]
    fn test_external_name_round_trips_through_annotation() {
        let mut fo = sample();
        assert_eq!(fo.external_name(), None);

        fo.set_external_name("zone-1");
        assert_eq!(fo.external_name(), Some("zone-1"));
        assert_eq!(
            fo.annotations().get("crossplane.io/external-name"),
            Some(&"zone-1".to_string())
        );
    }

    #[test]
    fn test_empty_external_name_is_treated_as_unset() {
        let mut fo = sample();
        fo.set_external_name("");
        assert_eq!(fo.external_name(), None);
    }

    #[test]
    fn test_crd_is_cluster_scoped_with_printer_columns() {
        let crd = FallbackOrigin::crd();
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.group, "sslsaas.cloudflare.crossplane.io");

        let version = &crd.spec.versions[0];
        let columns: Vec<&str> = version
            .additional_printer_columns
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(columns, vec!["Ready", "Synced", "Zone", "Origin"]);
    }
}
