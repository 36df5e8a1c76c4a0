//! Device authorization flow client
//!
//! Wraps the two identity-provider interactions: the device-code request
//! and the token poll loop. Endpoints are derived from the discovered
//! domain; `with_issuer()` lets tests substitute a local mock server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::discovery::OidcConfig;
use crate::error::{Error, Result};
use crate::types::{DEVICE_CODE_GRANT_TYPE, DeviceCodeGrant, OFFLINE_ACCESS_SCOPE, TokenSet};

/// Consecutive transport failures tolerated inside the poll loop before
/// the flow gives up. Transient network blips during a multi-minute poll
/// are expected; a persistently unreachable provider is not.
const MAX_TRANSPORT_FAILURES: u32 = 3;

/// Client for a provider's device authorization endpoints.
pub struct DeviceFlowClient {
    http: reqwest::Client,
    device_code_url: String,
    token_url: String,
    client_id: String,
    audience: String,
}

/// Wire body for the device-code request. `scope` is omitted entirely
/// (not sent as null) when offline access was not requested.
#[derive(Serialize)]
struct DeviceCodeRequest<'a> {
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    audience: &'a str,
}

/// Wire body for the token poll request.
#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    device_code: &'a str,
    grant_type: &'a str,
}

/// The one field of a provider error body the poll loop inspects.
#[derive(Deserialize)]
struct ProviderErrorBody {
    error: String,
}

impl DeviceFlowClient {
    /// Build a flow client from the discovered configuration. Endpoints
    /// live at `https://<domain>/oauth/...` per the provider contract.
    pub fn new(http: reqwest::Client, oidc: &OidcConfig) -> Self {
        let issuer = format!("https://{}", oidc.domain);
        Self::with_issuer(http, &issuer, oidc)
    }

    /// Build against an explicit issuer base URL. Lets tests drive the
    /// real flow against a plain-http mock server.
    pub fn with_issuer(http: reqwest::Client, issuer: &str, oidc: &OidcConfig) -> Self {
        let base = issuer.trim_end_matches('/');
        Self {
            http,
            device_code_url: format!("{base}/oauth/device/code"),
            token_url: format!("{base}/oauth/token"),
            client_id: oidc.native_client_id.clone(),
            audience: oidc.audience.clone(),
        }
    }

    /// Request a single-use device authorization grant.
    ///
    /// `offline` requests the `offline_access` scope so the eventual
    /// token response includes a refresh token. Authenticated by client
    /// id only; non-success responses are fatal and carry the status and
    /// body verbatim.
    pub async fn request_device_code(&self, offline: bool) -> Result<DeviceCodeGrant> {
        debug!(url = %self.device_code_url, offline, "requesting device code");

        let payload = DeviceCodeRequest {
            client_id: &self.client_id,
            scope: offline.then_some(OFFLINE_ACCESS_SCOPE),
            audience: &self.audience,
        };

        let response = self
            .http
            .post(&self.device_code_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::DeviceCode {
                url: self.device_code_url.clone(),
                status,
                body,
            });
        }

        response
            .json::<DeviceCodeGrant>()
            .await
            .map_err(|e| Error::InvalidResponse {
                url: self.device_code_url.clone(),
                message: e.to_string(),
            })
    }

    /// Poll the token endpoint until the operator completes sign-in, the
    /// grant expires, the provider reports a fatal error, or `cancel`
    /// fires.
    ///
    /// The deadline is computed once at entry from `expires_in`; the wait
    /// between attempts is the grant's server-dictated `interval`. The two
    /// bounds are enforced independently. `authorization_pending` is the
    /// expected steady state, not an error; every other provider code is
    /// terminal.
    pub async fn poll_token(
        &self,
        grant: &DeviceCodeGrant,
        cancel: &CancellationToken,
    ) -> Result<TokenSet> {
        let payload = TokenRequest {
            client_id: &self.client_id,
            device_code: &grant.device_code,
            grant_type: DEVICE_CODE_GRANT_TYPE,
        };
        let deadline = Instant::now() + Duration::from_secs(grant.expires_in);
        let interval = Duration::from_secs(grant.interval);
        let mut transport_failures: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if Instant::now() >= deadline {
                return Err(Error::Expired);
            }

            let response = match self.http.post(&self.token_url).json(&payload).send().await {
                Ok(response) => {
                    transport_failures = 0;
                    response
                }
                Err(source) => {
                    transport_failures += 1;
                    if transport_failures >= MAX_TRANSPORT_FAILURES {
                        return Err(Error::Transport(source));
                    }
                    warn!(
                        error = %source,
                        attempt = transport_failures,
                        "token request failed, retrying after interval"
                    );
                    self.wait(interval, cancel).await?;
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<TokenSet>()
                    .await
                    .map_err(|e| Error::InvalidResponse {
                        url: self.token_url.clone(),
                        message: e.to_string(),
                    });
            }

            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            let code = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .map(|b| b.error);

            if code.as_deref() == Some("authorization_pending") {
                debug!(interval_secs = grant.interval, "authorization pending");
                self.wait(interval, cancel).await?;
                continue;
            }

            return Err(Error::Provider {
                url: self.token_url.clone(),
                status,
                body,
                code,
            });
        }
    }

    /// Sleep for `interval`, aborting early when cancellation fires.
    async fn wait(&self, interval: Duration, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            _ = tokio::time::sleep(interval) => Ok(()),
        }
    }
}
