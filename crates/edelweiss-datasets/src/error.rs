//! Error types for dataset API operations

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from dataset API calls. API failures carry the request URL,
/// status, and raw body so the operator sees exactly what the server said.
#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} returned {status}: {body}")]
    Api {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

/// Result alias for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;
