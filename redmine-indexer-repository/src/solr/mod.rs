//! Solr implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! that talks to the Solr JSON update handler over HTTP.

mod connector;
mod provider;

pub use connector::SolrConnector;
pub use provider::SolrProvider;
