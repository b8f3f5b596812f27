//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations.

use async_trait::async_trait;
use redmine_indexer_shared::IndexedDocument;

use crate::errors::SearchIndexError;
use crate::types::{DeleteByTypeRequest, IndexResponse};

/// Abstracts the underlying search index implementation.
///
/// An indexing run replaces all documents of one item type: it deletes them, adds the
/// fresh batch in one request and commits. Deletions and additions become visible to
/// searchers only after `commit`.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check that the backend is reachable and answering.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend responded
    /// * `Err(SearchIndexError)` - `ConnectionError` if it did not
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Delete every document of the requested item type.
    ///
    /// # Arguments
    ///
    /// * `request` - The item type, optionally narrowed to one site
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the delete was accepted (matching zero documents is fine)
    /// * `Err(SearchIndexError)` - `DeleteError` if the backend rejected it
    async fn delete_by_type(&self, request: &DeleteByTypeRequest) -> Result<(), SearchIndexError>;

    /// Submit a batch of documents in a single request.
    ///
    /// The backend's answer is returned as-is, including non-success statuses, so the
    /// caller decides how to treat a rejected batch and can log the full response.
    ///
    /// # Arguments
    ///
    /// * `documents` - The complete batch to add
    ///
    /// # Returns
    ///
    /// * `Ok(IndexResponse)` - The status and body returned by the backend
    /// * `Err(SearchIndexError)` - If the request could not be built or sent
    async fn add_documents(
        &self,
        documents: &[IndexedDocument],
    ) -> Result<IndexResponse, SearchIndexError>;

    /// Make pending deletions and additions visible.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the commit succeeded
    /// * `Err(SearchIndexError)` - `CommitError` if it failed
    async fn commit(&self) -> Result<(), SearchIndexError>;
}
