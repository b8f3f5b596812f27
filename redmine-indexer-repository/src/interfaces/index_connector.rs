//! Index connector trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SolrServer;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;

/// Builds a connected `SearchIndexProvider` for a configured server.
///
/// Every indexing run asks for a fresh connection, so no provider state is shared
/// between runs. Tests inject connectors that hand out mock providers.
#[async_trait]
pub trait IndexConnector: Send + Sync {
    /// Connect to `server` and verify it is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(provider)` - A provider ready for document operations
    /// * `Err(SearchIndexError)` - If the connection could not be established
    async fn connect(
        &self,
        server: &SolrServer,
    ) -> Result<Arc<dyn SearchIndexProvider>, SearchIndexError>;
}
