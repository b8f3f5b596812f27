//! # Redmine Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search index. It includes definitions for errors, interfaces, the connection
//! parameters of a search server, and a concrete implementation for Apache Solr.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod solr;
pub mod types;
pub mod utils;

pub use config::SolrServer;
pub use errors::SearchIndexError;
pub use interfaces::{IndexConnector, SearchIndexProvider};
pub use solr::{SolrConnector, SolrProvider};
pub use types::{DeleteByTypeRequest, IndexResponse};
pub use utils::{document_id, site_hash};
