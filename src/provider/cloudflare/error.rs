//! Errors returned by the Cloudflare client.

use super::responses::ApiErrorDetail;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Cloudflare has no fallback origin for the zone
    #[error("fallback origin not found: {message}")]
    NotFound { message: String },

    /// Cloudflare rejected the request
    #[error("Cloudflare API error (HTTP {status}): {}", join_errors(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// The request never produced a response
    #[error("HTTP request to Cloudflare failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response could not be interpreted
    #[error("failed to decode Cloudflare response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
}

fn join_errors(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_lists_every_detail() {
        let err = ClientError::Api {
            status: 400,
            errors: vec![
                ApiErrorDetail {
                    code: 1004,
                    message: "DNS Validation Error".to_string(),
                },
                ApiErrorDetail {
                    code: 7003,
                    message: "Could not route".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Cloudflare API error (HTTP 400): 1004: DNS Validation Error; 7003: Could not route"
        );
    }

    #[test]
    fn test_api_error_without_details() {
        let err = ClientError::Api {
            status: 502,
            errors: vec![],
        };
        assert!(err.to_string().ends_with("no error details"));
    }
}
