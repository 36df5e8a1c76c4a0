//! Edelweiss device authorization client
//!
//! Implements the OAuth2 Device Authorization Grant (RFC 8628) against an
//! Edelweiss Data deployment. One run is a strict sequence:
//!
//! 1. `discovery::fetch_oidc_config()` reads the provider settings from
//!    `<base>/oidc`
//! 2. `DeviceFlowClient::request_device_code()` obtains the device/user
//!    code pair
//! 3. The caller surfaces the verification URL and user code to the operator
//! 4. `DeviceFlowClient::poll_token()` exchanges the device code for tokens
//!    once the operator finishes signing in, or fails on expiry, denial, or
//!    cancellation
//!
//! This crate is a standalone library with no dependency on the CLI binary.
//! The flow client is built from a `reqwest::Client` and the discovered
//! configuration, and its endpoints can be overridden so tests can point
//! the whole flow at a mock server.

pub mod client;
pub mod discovery;
pub mod error;
pub mod types;

pub use client::DeviceFlowClient;
pub use discovery::{OidcConfig, fetch_oidc_config};
pub use error::{Error, Result};
pub use types::{DeviceCodeGrant, TokenSet};

use std::time::Duration;

/// Per-request timeout for identity-provider calls.
///
/// Bounds a single hung request independently of the grant's overall
/// expiry deadline, so one unresponsive poll cannot stall the loop past
/// `expires_in`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used for the authentication flow.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}
