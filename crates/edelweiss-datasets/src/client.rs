//! Dataset API client
//!
//! Request/response handling follows one shape throughout: issue the call
//! with the bearer token, fail with the verbatim status and body on any
//! non-success response, then parse the JSON payload. Responses whose
//! schema the client does not need to understand are returned as raw
//! `serde_json::Value`.

use common::Secret;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A dataset as returned by the create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
}

/// Bearer-token-authenticated client for the dataset REST API.
///
/// The token is held in a [`Secret`] so a derived `Debug` of this struct
/// never prints it.
#[derive(Debug)]
pub struct DatasetsClient {
    http: reqwest::Client,
    base_url: String,
    token: Secret,
}

impl DatasetsClient {
    pub fn new(http: reqwest::Client, base_url: &str, token: Secret) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create a new dataset. The dataset starts with an in-progress
    /// version that data can be uploaded into.
    pub async fn create_dataset(&self, name: &str) -> Result<Dataset> {
        let url = format!("{}/datasets/create", self.base_url);
        debug!(%url, name, "creating dataset");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Self::parse_json(url, response).await
    }

    /// Upload a data file into the dataset's in-progress version.
    pub async fn upload_data(
        &self,
        dataset_id: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/datasets/{dataset_id}/in-progress/data/upload",
            self.base_url
        );
        debug!(%url, file_name, bytes = data.len(), "uploading data");
        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("data", part);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .multipart(form)
            .send()
            .await?;
        Self::parse_json(url, response).await
    }

    /// Ask the server to infer a schema from the uploaded data.
    pub async fn infer_schema(&self, dataset_id: &str) -> Result<serde_json::Value> {
        let url = format!(
            "{}/datasets/{dataset_id}/in-progress/schema/infer",
            self.base_url
        );
        debug!(%url, "inferring schema");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;
        Self::parse_json(url, response).await
    }

    /// Publish the in-progress version, making it queryable.
    pub async fn publish(&self, dataset_id: &str, changelog: &str) -> Result<serde_json::Value> {
        let url = format!("{}/datasets/{dataset_id}/in-progress/publish", self.base_url);
        debug!(%url, changelog, "publishing dataset");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .json(&serde_json::json!({ "changelog": changelog }))
            .send()
            .await?;
        Self::parse_json(url, response).await
    }

    /// Query a published version. The query document is passed through
    /// as the `query` URL parameter, JSON-encoded.
    pub async fn query_version(
        &self,
        dataset_id: &str,
        version: u64,
        query: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/datasets/{dataset_id}/versions/{version}/data",
            self.base_url
        );
        debug!(%url, "querying dataset version");
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose())
            .query(&[("query", query.to_string())])
            .send()
            .await?;
        Self::parse_json(url, response).await
    }

    /// Delete a dataset and all its versions.
    pub async fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
        let url = format!("{}/datasets/{dataset_id}", self.base_url);
        debug!(%url, "deleting dataset");
        let response = self
            .http
            .delete(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;
        Self::ensure_success(url, response).await?;
        Ok(())
    }

    /// Fail with the verbatim status and body on a non-success response.
    async fn ensure_success(url: String, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Api { url, status, body });
        }
        Ok(response)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::ensure_success(url.clone(), response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::InvalidResponse {
                url,
                message: e.to_string(),
            })
    }
}
