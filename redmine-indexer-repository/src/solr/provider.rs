//! Solr provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! on top of the Solr JSON update handler, using `reqwest` for transport.

use std::time::Duration;

use async_trait::async_trait;
use redmine_indexer_shared::{fields, IndexedDocument};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::config::SolrServer;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{DeleteByTypeRequest, IndexResponse};

const USER_AGENT: &str = concat!("redmine-indexer/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single request to Solr.
const REQUEST_TIMEOUT_SECS: u64 = 60;

const UPDATE_PATH: &str = "update?wt=json";
const PING_PATH: &str = "admin/ping?wt=json";

/// Solr provider implementation.
///
/// Sends deletes, document batches and commits to the update handler of one core.
///
/// # Example
///
/// ```ignore
/// use redmine_indexer_repository::{SolrProvider, SolrServer, SearchIndexProvider};
///
/// let server = SolrServer::new("localhost", 1, 0);
/// let provider = SolrProvider::new(&server)?;
/// provider.ping().await?;
/// provider.commit().await?;
/// ```
pub struct SolrProvider {
    client: Client,
    core_url: Url,
}

impl SolrProvider {
    /// Create a new Solr provider for the given server.
    ///
    /// No request is sent; call `ping` to check the server is reachable.
    ///
    /// # Arguments
    ///
    /// * `server` - The connection parameters of the Solr core
    ///
    /// # Returns
    ///
    /// * `Ok(SolrProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the HTTP client cannot be built
    pub fn new(server: &SolrServer) -> Result<Self, SearchIndexError> {
        let core_url = server.core_url()?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .danger_accept_invalid_certs(!server.verify_tls)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %core_url,
            root_page_uid = server.root_page_uid,
            language = server.language,
            "Created Solr provider"
        );

        Ok(Self { client, core_url })
    }

    /// The base URL of the core this provider writes to.
    pub fn core_url(&self) -> &Url {
        &self.core_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchIndexError> {
        self.core_url
            .join(path)
            .map_err(|e| SearchIndexError::validation(e.to_string()))
    }

    /// Build the Solr query matching the documents a delete request targets.
    fn delete_query(request: &DeleteByTypeRequest) -> String {
        let mut query = format!("{}:{}", fields::TYPE, quote_term(&request.item_type));
        if let Some(ref site_hash) = request.site_hash {
            query.push_str(&format!(" AND {}:{}", fields::SITE_HASH, quote_term(site_hash)));
        }
        query
    }

    /// Check the body of a ping response.
    fn check_ping_body(body: &str) -> Result<(), SearchIndexError> {
        let parsed: Value = serde_json::from_str(body)
            .map_err(|e| SearchIndexError::parse(format!("Invalid ping response: {}", e)))?;

        match parsed.get("status").and_then(Value::as_str) {
            Some("OK") => Ok(()),
            other => Err(SearchIndexError::connection(format!(
                "Ping returned status {:?}",
                other
            ))),
        }
    }

    /// POST a JSON command to the update handler, returning status and body.
    async fn post_update(
        &self,
        url: Url,
        command: &Value,
    ) -> Result<(u16, String), reqwest::Error> {
        let response = self.client.post(url).json(command).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        Ok((status, text))
    }
}

/// Quote a value for use as a term in a Solr query.
fn quote_term(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl SearchIndexProvider for SolrProvider {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let url = self.endpoint(PING_PATH)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                SearchIndexError::connection(format!("Ping to {} failed: {}", url, e))
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            error!(url = %url, status = %status, body = %body, "Ping request failed");
            return Err(SearchIndexError::connection(format!(
                "Ping to {} failed with status {}: {}",
                url, status, body
            )));
        }

        Self::check_ping_body(&body)?;

        debug!(url = %url, "Solr server is reachable");
        Ok(())
    }

    async fn delete_by_type(&self, request: &DeleteByTypeRequest) -> Result<(), SearchIndexError> {
        let query = Self::delete_query(request);
        let url = self.endpoint(UPDATE_PATH)?;

        let (status, body) = self
            .post_update(url, &json!({ "delete": { "query": query } }))
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        if !is_success(status) {
            error!(status = status, body = %body, query = %query, "Delete request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, body
            )));
        }

        debug!(query = %query, "Documents deleted");
        Ok(())
    }

    async fn add_documents(
        &self,
        documents: &[IndexedDocument],
    ) -> Result<IndexResponse, SearchIndexError> {
        let url = self.endpoint(UPDATE_PATH)?;
        let payload = serde_json::to_vec(documents)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        debug!(
            count = documents.len(),
            status = status,
            "Bulk add request completed"
        );
        Ok(IndexResponse::new(status, body))
    }

    async fn commit(&self) -> Result<(), SearchIndexError> {
        let url = self.endpoint(UPDATE_PATH)?;

        let (status, body) = self
            .post_update(url, &json!({ "commit": {} }))
            .await
            .map_err(|e| SearchIndexError::commit(e.to_string()))?;

        if !is_success(status) {
            error!(status = status, body = %body, "Commit request failed");
            return Err(SearchIndexError::commit(format!(
                "Commit failed with status {}: {}",
                status, body
            )));
        }

        debug!("Changes committed");
        Ok(())
    }
}
