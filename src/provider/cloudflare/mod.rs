//! Cloudflare API REST Client
//!
//! Minimal REST client for the Cloudflare API v4.
//! Uses reqwest with rustls (no OpenSSL dependencies).
//!
//! Only the SSL for SaaS fallback origin endpoints are implemented; they are
//! exposed through [`crate::provider::FallbackOriginApi`].
//!
//! References:
//! - [Custom Hostname Fallback Origin](https://developers.cloudflare.com/api/resources/custom_hostnames/subresources/fallback_origin/)

mod credentials;
mod error;
pub mod fallback_origin;
mod operations;
mod requests;
mod responses;

pub use credentials::{Credentials, CredentialsError};
pub use error::ClientError;
pub use responses::{ApiErrorDetail, ApiResponse, FallbackOriginRecord};

use crate::constants::FALLBACK_ORIGIN_NOT_FOUND_CODE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Cloudflare API REST client
pub struct CloudflareClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl CloudflareClient {
    /// Create a new client for the given API base URL
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fallback-origin-controller/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for a path relative to the base URL
    pub(crate) fn make_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self
            .http_client
            .request(method, url)
            .header("Content-Type", "application/json");
        self.credentials.authorize(request)
    }

    /// Send a request and unwrap the Cloudflare envelope
    ///
    /// Returns the `result` member, which may be absent on deletes.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Cloudflare responded with HTTP {}", status.as_u16());
        interpret_response(status, &body)
    }
}

/// Map an HTTP status and body onto a result or a classified error
pub(crate) fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, ClientError> {
    let envelope = match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => envelope,
        Err(_) if status == StatusCode::NOT_FOUND => {
            return Err(ClientError::NotFound {
                message: body.trim().to_string(),
            });
        }
        Err(_) if !status.is_success() => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                errors: vec![ApiErrorDetail {
                    code: 0,
                    message: body.trim().to_string(),
                }],
            });
        }
        Err(e) => {
            return Err(ClientError::Decode {
                status: status.as_u16(),
                message: e.to_string(),
            });
        }
    };

    if let Some(detail) = envelope
        .errors
        .iter()
        .find(|e| e.code.to_string() == FALLBACK_ORIGIN_NOT_FOUND_CODE)
    {
        return Err(ClientError::NotFound {
            message: detail.to_string(),
        });
    }

    if !status.is_success() || !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            errors: envelope.errors,
        });
    }

    Ok(envelope.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_code_is_classified() {
        let body = r#"{"success":false,"errors":[{"code":1551,"message":"No fallback origin found"}],"messages":[],"result":null}"#;
        let err = interpret_response::<FallbackOriginRecord>(StatusCode::NOT_FOUND, body)
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
        assert!(err.to_string().contains("1551"));
    }

    #[test]
    fn test_plain_text_404_is_not_found() {
        let err = interpret_response::<FallbackOriginRecord>(StatusCode::NOT_FOUND, "404 page")
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[test]
    fn test_other_api_errors_keep_details() {
        let body = r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}],"messages":[],"result":null}"#;
        let err = interpret_response::<FallbackOriginRecord>(StatusCode::FORBIDDEN, body)
            .unwrap_err();
        match err {
            ClientError::Api { status, errors } => {
                assert_eq!(status, 403);
                assert_eq!(errors[0].code, 10000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_success_returns_result() {
        let body = r#"{"success":true,"errors":[],"messages":[],"result":{"origin":"fallback.example.com","status":"active","errors":[]}}"#;
        let record = interpret_response::<FallbackOriginRecord>(StatusCode::OK, body)
            .unwrap()
            .unwrap();
        assert_eq!(record.origin, "fallback.example.com");
    }

    #[test]
    fn test_unparseable_success_is_decode_error() {
        let err =
            interpret_response::<FallbackOriginRecord>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode { status: 200, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CloudflareClient::new(
            Credentials::Token("t".to_string()),
            "http://localhost:8080/client/v4/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/client/v4");
    }
}
