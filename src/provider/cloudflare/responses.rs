//! Response types for the Cloudflare API v4.

use serde::{Deserialize, Serialize};

/// Standard Cloudflare response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    pub result: Option<T>,
}

/// Error entry of a response envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiErrorDetail {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Fallback origin as returned by the custom hostnames API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FallbackOriginRecord {
    /// Fallback origin hostname; empty when Cloudflare has none on record
    #[serde(default)]
    pub origin: String,
    /// Deployment status, e.g. "active", "pending_deployment"
    #[serde(default)]
    pub status: String,
    /// Errors Cloudflare reports against the fallback origin
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
