//! Loader module for the Redmine indexer.
//!
//! Writes a run's documents to the search index: clear the previous project documents,
//! submit the fresh batch and commit.

use std::sync::Arc;

use redmine_indexer_repository::{DeleteByTypeRequest, SearchIndexProvider};
use redmine_indexer_shared::IndexedDocument;
use tracing::{debug, error, instrument};

use crate::errors::IngestError;

/// Loader that indexes documents into the search engine.
pub struct SearchLoader {
    provider: Arc<dyn SearchIndexProvider>,
}

impl SearchLoader {
    /// Create a new search loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Delete the documents matched by `request`.
    #[instrument(skip(self), fields(item_type = %request.item_type))]
    pub async fn clear(&self, request: &DeleteByTypeRequest) -> Result<(), IngestError> {
        self.provider.delete_by_type(request).await.map_err(|e| {
            error!(
                item_type = %request.item_type,
                site_hash = ?request.site_hash,
                error = %e,
                "Failed to delete previous documents"
            );
            IngestError::clear(e.to_string())
        })
    }

    /// Submit the whole batch in one request.
    ///
    /// A batch is accepted only if the backend answers with a success status. On
    /// failure the serialized batch and the backend's answer are logged for diagnosis.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn submit(&self, documents: &[IndexedDocument]) -> Result<(), IngestError> {
        match self.provider.add_documents(documents).await {
            Ok(response) if response.is_success() => {
                debug!(
                    count = documents.len(),
                    status = response.status,
                    "Submitted documents"
                );
                Ok(())
            }
            Ok(response) => {
                error!(
                    status = response.status,
                    response = %response.body,
                    documents = %serialize_batch(documents),
                    "Search index rejected document batch"
                );
                Err(IngestError::submission(Some(response.status), response.body))
            }
            Err(e) => {
                error!(
                    error = %e,
                    documents = %serialize_batch(documents),
                    "Failed to submit document batch"
                );
                Err(IngestError::submission(None, e.to_string()))
            }
        }
    }

    /// Commit pending deletions and additions.
    #[instrument(skip(self))]
    pub async fn commit(&self) -> Result<(), IngestError> {
        self.provider.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit search index changes");
            IngestError::commit(e.to_string())
        })
    }
}

fn serialize_batch(documents: &[IndexedDocument]) -> String {
    serde_json::to_string(documents)
        .unwrap_or_else(|e| format!("<unserializable batch of {}: {}>", documents.len(), e))
}
