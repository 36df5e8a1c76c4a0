//! OIDC discovery
//!
//! An Edelweiss deployment publishes its identity-provider settings as a
//! small JSON document at `<base>/oidc`. The document is fetched once per
//! run, before any device-code or token request; a failure here is fatal
//! since it means the base URL is wrong or the service is down.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Identity-provider settings discovered from the service.
///
/// `domain` is the authority hostname all subsequent OAuth endpoints are
/// built from; `native_client_id` identifies the public CLI client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfig {
    pub domain: String,
    pub native_client_id: String,
    pub audience: String,
}

/// Fetch the OIDC configuration from `<base_url>/oidc`.
///
/// Unauthenticated GET. Any non-success status fails with the response
/// status and body reproduced verbatim.
pub async fn fetch_oidc_config(client: &reqwest::Client, base_url: &str) -> Result<OidcConfig> {
    let url = format!("{}/oidc", base_url.trim_end_matches('/'));
    debug!(%url, "fetching oidc configuration");

    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::Discovery { url, status, body });
    }

    response
        .json::<OidcConfig>()
        .await
        .map_err(|e| Error::InvalidResponse {
            url,
            message: e.to_string(),
        })
}
