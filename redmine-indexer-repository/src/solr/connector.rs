//! Connection setup for Solr providers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SolrServer;
use crate::errors::SearchIndexError;
use crate::interfaces::{IndexConnector, SearchIndexProvider};
use crate::solr::provider::SolrProvider;

/// Connects to Solr cores by building a `SolrProvider` and pinging it.
///
/// There is no retry: a server that does not answer the ping fails the connection.
#[derive(Debug, Clone, Default)]
pub struct SolrConnector;

impl SolrConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IndexConnector for SolrConnector {
    async fn connect(
        &self,
        server: &SolrServer,
    ) -> Result<Arc<dyn SearchIndexProvider>, SearchIndexError> {
        let provider = SolrProvider::new(server)?;

        if let Err(e) = provider.ping().await {
            warn!(
                url = %provider.core_url(),
                error = %e,
                "Solr server did not answer ping"
            );
            if e.is_connection() {
                return Err(e);
            }
            return Err(SearchIndexError::connection(e.to_string()));
        }

        info!(url = %provider.core_url(), "Solr connection established");
        Ok(Arc::new(provider))
    }
}
