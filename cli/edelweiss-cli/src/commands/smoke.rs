//! Dataset API smoke test
//!
//! Drives the dataset lifecycle end to end with an existing bearer token:
//! create → upload sample CSV → infer schema → publish → query → delete.
//! Steps run strictly in order and the first failure aborts the run with
//! that step's error.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::info;
use uuid::Uuid;

use common::Secret;
use edelweiss_datasets::DatasetsClient;

use crate::config::Config;

const SAMPLE_CSV: &str = "\"FirstName\",\"LastName\"\n\"John\",\"Doe\"\n\"Jane\",\"Doe\"\n";

pub async fn run(
    config: &Config,
    token: Option<String>,
    token_file: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let token = resolve_token(token, token_file)?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("failed to build HTTP client")?;
    let client = DatasetsClient::new(http, &config.url, token);

    let dataset_name = name.unwrap_or_else(|| format!("smoke-{}", Uuid::new_v4().simple()));

    let dataset = client
        .create_dataset(&dataset_name)
        .await
        .context("failed to create dataset")?;
    info!(id = %dataset.id, name = %dataset.name, "dataset created");

    client
        .upload_data(&dataset.id, "test.csv", SAMPLE_CSV.as_bytes().to_vec())
        .await
        .context("failed to upload data")?;
    info!("data uploaded");

    client
        .infer_schema(&dataset.id)
        .await
        .context("failed to infer schema")?;
    info!("schema inferred");

    client
        .publish(&dataset.id, "Initial Version")
        .await
        .context("failed to publish dataset")?;
    info!("dataset published");

    client
        .query_version(&dataset.id, 1, &serde_json::json!({ "columns": [] }))
        .await
        .context("failed to query published version")?;
    info!("query succeeded");

    client
        .delete_dataset(&dataset.id)
        .await
        .context("failed to delete dataset")?;
    info!("dataset deleted");

    info!(name = %dataset_name, "smoke test passed");
    Ok(())
}

/// Resolve the bearer token from the flag value or a token file, so a
/// token generated elsewhere can be handed in as a `token.jwt` file.
fn resolve_token(token: Option<String>, token_file: Option<PathBuf>) -> Result<Secret> {
    if let Some(token) = token {
        return Ok(Secret::new(token));
    }
    if let Some(path) = token_file {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read token file {}", path.display()))?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            bail!("token file {} is empty", path.display());
        }
        return Ok(Secret::new(trimmed));
    }
    bail!("no bearer token: pass --token, set EDELWEISS_TOKEN, or pass --token-file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_flag_wins() {
        let token = resolve_token(Some("from-flag".into()), None).unwrap();
        assert_eq!(token.expose(), "from-flag");
    }

    #[test]
    fn token_file_is_read_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.jwt");
        std::fs::write(&path, "  file-token \n").unwrap();

        let token = resolve_token(None, Some(path)).unwrap();
        assert_eq!(token.expose(), "file-token");
    }

    #[test]
    fn empty_token_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.jwt");
        std::fs::write(&path, "  \n").unwrap();

        assert!(resolve_token(None, Some(path)).is_err());
    }

    #[test]
    fn missing_token_sources_is_an_error() {
        let err = resolve_token(None, None).unwrap_err().to_string();
        assert!(err.contains("--token"), "error must point at the options: {err}");
    }

    #[test]
    fn missing_token_file_is_an_error() {
        assert!(resolve_token(None, Some(PathBuf::from("/nonexistent/token.jwt"))).is_err());
    }
}
