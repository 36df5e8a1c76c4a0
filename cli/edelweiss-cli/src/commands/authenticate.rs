//! Device authorization login
//!
//! Runs the four-step flow: discover the identity provider, request a
//! device code, show the operator where to sign in, then poll until the
//! provider reports success, expiry, or a fatal error. Ctrl-C cancels the
//! poll cleanly instead of killing the process mid-request.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use edelweiss_auth::{DeviceCodeGrant, DeviceFlowClient, fetch_oidc_config};

use crate::config::Config;

pub async fn run(config: &Config, refresh_token: bool) -> Result<()> {
    let http = edelweiss_auth::http_client().context("failed to build HTTP client")?;

    let oidc = fetch_oidc_config(&http, &config.url)
        .await
        .context("failed to discover identity provider settings")?;
    info!(domain = %oidc.domain, "identity provider discovered");

    let flow = DeviceFlowClient::new(http, &oidc);
    let grant = flow
        .request_device_code(refresh_token)
        .await
        .context("failed to obtain a device code")?;

    prompt_operator(&grant);

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let tokens = flow.poll_token(&grant, &cancel).await?;

    info!("authentication successful");
    // The token set is the command's only stdout output, printed whole
    // and only after the flow succeeded.
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

/// Show the operator where to finish signing in. Goes to stderr so a
/// redirected stdout still receives only the token JSON.
fn prompt_operator(grant: &DeviceCodeGrant) {
    eprintln!("Visit this url in your web browser to sign into Edelweiss:");
    eprintln!("{}\n", grant.verification_uri_complete);
    eprintln!("Your confirmation code is {}", grant.user_code);
    eprintln!("Waiting for authentication...");
}
