//! Cloudflare API credentials as stored in a ProviderConfig Secret.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("credentials are not valid JSON: {0}")]
    InvalidJson(String),
    #[error("credentials must contain either \"token\" or both \"apiKey\" and \"email\"")]
    Incomplete,
}

/// Authentication material for the Cloudflare API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token, sent as a bearer token
    Token(String),
    /// Global API key with the account email
    ApiKey { key: String, email: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
            Self::ApiKey { email, .. } => f
                .debug_struct("ApiKey")
                .field("key", &"***")
                .field("email", email)
                .finish(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCredentials {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, alias = "api_key")]
    api_key: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl Credentials {
    /// Parse credentials from the JSON document stored in a Secret key
    ///
    /// A token takes precedence when both forms are present. Blank values
    /// count as missing.
    ///
    /// # Errors
    /// Returns an error when the payload is not JSON or carries neither form
    pub fn from_json(data: &[u8]) -> Result<Self, CredentialsError> {
        let raw: RawCredentials = serde_json::from_slice(data)
            .map_err(|e| CredentialsError::InvalidJson(e.to_string()))?;

        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(token) = non_blank(raw.token) {
            return Ok(Self::Token(token));
        }
        match (non_blank(raw.api_key), non_blank(raw.email)) {
            (Some(key), Some(email)) => Ok(Self::ApiKey { key, email }),
            _ => Err(CredentialsError::Incomplete),
        }
    }

    /// Apply the matching authentication headers to a request
    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Token(token) => request.bearer_auth(token),
            Self::ApiKey { key, email } => request
                .header("X-Auth-Key", key)
                .header("X-Auth-Email", email),
        }
    }
}
