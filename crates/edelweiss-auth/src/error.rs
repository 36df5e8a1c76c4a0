//! Error types for the device authorization flow
//!
//! Every variant that originates from an HTTP response carries the request
//! URL, the HTTP status, and the raw response body text, so an operator can
//! diagnose provider-side failures without the client decoding anything
//! beyond the `error` code field.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the device authorization flow. All variants are terminal:
/// nothing is retried except the `authorization_pending` steady state
/// inside the poll loop, which is not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("discovery request to {url} returned {status}: {body}")]
    Discovery {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("device code request to {url} returned {status}: {body}")]
    DeviceCode {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("timed out waiting for authentication")]
    Expired,

    /// The provider reported a non-pending error code during polling
    /// (e.g. `access_denied`, `expired_token`, `slow_down`).
    #[error("token request to {url} returned {status}: {body}")]
    Provider {
        url: String,
        status: StatusCode,
        body: String,
        /// Parsed `error` code, when the body was valid provider JSON
        code: Option<String>,
    },

    #[error("authentication cancelled")]
    Cancelled,

    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

/// Result alias for flow operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_reproduce_url_status_and_body() {
        let err = Error::Discovery {
            url: "https://api.example.com/oidc".into(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "down for maintenance".into(),
        };
        let message = err.to_string();
        assert!(message.contains("https://api.example.com/oidc"));
        assert!(message.contains("503"));
        assert!(message.contains("down for maintenance"));
    }

    #[test]
    fn provider_error_keeps_parsed_code() {
        let err = Error::Provider {
            url: "https://idp.example.com/oauth/token".into(),
            status: StatusCode::FORBIDDEN,
            body: r#"{"error":"access_denied"}"#.into(),
            code: Some("access_denied".into()),
        };
        match err {
            Error::Provider { code, .. } => assert_eq!(code.as_deref(), Some("access_denied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn terminal_variants_have_stable_messages() {
        assert_eq!(
            Error::Expired.to_string(),
            "timed out waiting for authentication"
        );
        assert_eq!(Error::Cancelled.to_string(), "authentication cancelled");
    }
}
