//! # Redmine Indexer
//!
//! Scheduled indexer that copies the project listing of a Redmine server into an
//! Apache Solr index, replacing the previous project documents on every run.
//!
//! ## Architecture
//!
//! The indexer follows the Fetcher-Processor-Loader pattern:
//!
//! 1. **Fetcher**: Retrieves the project listing from Redmine
//! 2. **Processor**: Maps project records into search documents
//! 3. **Loader**: Clears, submits and commits documents in the search index
//! 4. **Orchestrator**: Runs one indexing pass as a scheduled task
//!
//! ## Modules
//!
//! - [`config`]: Task configuration and dependency initialization
//! - [`fetcher`]: Redmine client and project records
//! - [`processor`]: Date normalization and document mapping
//! - [`loader`]: Writes documents into the search index
//! - [`orchestrator`]: The indexing pipeline
//! - [`errors`]: Error types for the indexer

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use config::{Dependencies, TaskConfig};
pub use errors::{ConfigError, FetchError, IngestError, ParseError};
pub use orchestrator::{IndexPipeline, RunOutcome, RunReport, ScheduledTask};

use redmine_indexer_repository::SearchIndexError;
use thiserror::Error;

/// Errors that prevent an indexing run from taking place.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The search server could not be reached.
    #[error("Connection error: {0}")]
    Connection(SearchIndexError),
}
