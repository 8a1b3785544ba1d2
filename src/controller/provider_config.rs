//! # ProviderConfig Resolution
//!
//! Follows a ProviderConfig to its credentials Secret and parses the
//! Cloudflare credentials stored there.

use crate::crd::{CredentialsSource, ProviderConfig};
use crate::provider::cloudflare::{Credentials, CredentialsError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::Api;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProviderConfigError {
    #[error("cannot get ProviderConfig {name}: {source}")]
    Get {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("ProviderConfig {0} does not reference a credentials Secret")]
    MissingSecretRef(String),

    #[error("cannot get credentials Secret {namespace}/{name}: {source}")]
    Secret {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Secret {namespace}/{name} has no key {key}")]
    MissingKey {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("invalid credentials in Secret {namespace}/{name}: {source}")]
    Credentials {
        namespace: String,
        name: String,
        #[source]
        source: CredentialsError,
    },
}

/// Looks up the Cloudflare credentials a ProviderConfig points at
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, provider_config_name: &str) -> Result<Credentials, ProviderConfigError>;
}

/// Resolves credentials through the Kubernetes API
#[derive(Clone)]
pub struct KubeCredentialResolver {
    client: kube::Client,
}

impl std::fmt::Debug for KubeCredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeCredentialResolver").finish_non_exhaustive()
    }
}

impl KubeCredentialResolver {
    #[must_use]
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialResolver for KubeCredentialResolver {
    async fn resolve(&self, provider_config_name: &str) -> Result<Credentials, ProviderConfigError> {
        let provider_configs: Api<ProviderConfig> = Api::all(self.client.clone());
        let pc = provider_configs
            .get(provider_config_name)
            .await
            .map_err(|source| ProviderConfigError::Get {
                name: provider_config_name.to_string(),
                source,
            })?;

        let selector = pc
            .spec
            .credentials
            .secret_ref
            .as_ref()
            .filter(|_| pc.spec.credentials.source == CredentialsSource::Secret)
            .ok_or_else(|| ProviderConfigError::MissingSecretRef(provider_config_name.to_string()))?;

        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &selector.namespace);
        let secret = secrets
            .get(&selector.name)
            .await
            .map_err(|source| ProviderConfigError::Secret {
                namespace: selector.namespace.clone(),
                name: selector.name.clone(),
                source,
            })?;

        debug!(
            "Resolved ProviderConfig {} to Secret {}/{}",
            provider_config_name, selector.namespace, selector.name
        );
        credentials_from_secret(&secret, &selector.namespace, &selector.name, &selector.key)
    }
}

/// Parse the credentials stored under `key` of a Secret
///
/// Both `data` and `stringData` are consulted, `data` first.
///
/// # Errors
/// Returns an error when the key is missing or the value is not valid credentials
pub fn credentials_from_secret(
    secret: &Secret,
    namespace: &str,
    name: &str,
    key: &str,
) -> Result<Credentials, ProviderConfigError> {
    let raw = secret
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .map(|bytes| bytes.0.clone())
        .or_else(|| {
            secret
                .string_data
                .as_ref()
                .and_then(|data| data.get(key))
                .map(|s| s.clone().into_bytes())
        })
        .ok_or_else(|| ProviderConfigError::MissingKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
            key: key.to_string(),
        })?;

    Credentials::from_json(&raw).map_err(|source| ProviderConfigError::Credentials {
        namespace: namespace.to_string(),
        name: name.to_string(),
        source,
    })
}
