//! Redmine REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::FetchError;
use crate::fetcher::messages::{decode_project_listing, ProjectRecord};

const USER_AGENT: &str = concat!("redmine-indexer/", env!("CARGO_PKG_VERSION"));

/// Timeout for the project listing request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait for fetching the project listing.
///
/// Abstracts the Redmine client so the pipeline can be driven by mock sources in tests.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch up to `limit` projects, in upstream order.
    async fn fetch_projects(&self, limit: u32) -> Result<Vec<ProjectRecord>, FetchError>;
}

/// Client for the Redmine projects API.
///
/// # Example
///
/// ```ignore
/// use redmine_indexer::fetcher::{ProjectSource, RedmineClient};
///
/// let client = RedmineClient::new("https://forge.typo3.org/")?;
/// let projects = client.fetch_projects(50).await?;
/// ```
pub struct RedmineClient {
    base_url: String,
    client: Client,
}

impl RedmineClient {
    /// Create a client for the Redmine server at `base_url`.
    ///
    /// A trailing `/` is appended to `base_url` when missing.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| FetchError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the project listing limited to `limit` entries.
    pub fn projects_url(&self, limit: u32) -> String {
        format!("{}projects.json?limit={}", self.base_url, limit)
    }
}

#[async_trait]
impl ProjectSource for RedmineClient {
    #[instrument(skip(self))]
    async fn fetch_projects(&self, limit: u32) -> Result<Vec<ProjectRecord>, FetchError> {
        let url = self.projects_url(limit);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody { url });
        }

        let listing = decode_project_listing(&body).map_err(|e| FetchError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!(
            url = %url,
            count = listing.projects.len(),
            total_count = ?listing.total_count,
            "Fetched project listing"
        );
        Ok(listing.projects)
    }
}
