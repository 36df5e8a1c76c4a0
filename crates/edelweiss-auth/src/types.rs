//! Wire types for the device authorization flow

use serde::{Deserialize, Serialize};

/// Scope requested when the caller wants a refresh token issued.
pub const OFFLINE_ACCESS_SCOPE: &str = "offline_access";

/// Grant type for the device-code token exchange (RFC 8628 §3.4).
pub const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// A single-use device authorization grant.
///
/// `device_code` is opaque and only ever sent back to the token endpoint;
/// `user_code` and `verification_uri_complete` are shown to the operator.
/// `expires_in` and `interval` (both seconds) jointly bound the poll loop.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCodeGrant {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri_complete: String,
    pub expires_in: u64,
    pub interval: u64,
}

/// Terminal success value of the flow.
///
/// `refresh_token` is present when `offline_access` was requested. The
/// remaining fields are carried through verbatim for the caller; this
/// crate never stores or refreshes the tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}
