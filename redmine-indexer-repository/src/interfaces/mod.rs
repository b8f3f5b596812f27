//! Interface definitions for the search index.
//!
//! This module defines the abstract `SearchIndexProvider` and `IndexConnector` traits
//! that allow for dependency injection and swappable search backend implementations.

mod index_connector;
mod search_index_provider;

pub use index_connector::IndexConnector;
pub use search_index_provider::SearchIndexProvider;
