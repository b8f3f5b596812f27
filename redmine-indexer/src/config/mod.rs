//! Configuration and dependency initialization for the Redmine indexer.
//!
//! - [`TaskConfig`]: settings of the indexing task
//! - [`ServerRegistry`]: Solr servers the host system makes available
//! - [`SiteRegistry`]: sites keyed by their root page
//! - [`Dependencies`]: wiring of the production pipeline from the environment

mod dependencies;
mod environment;
mod registry;
mod task_config;

pub use dependencies::Dependencies;
pub use redmine_indexer_repository::SolrServer;
pub use registry::{ServerRegistry, SiteRegistry};
pub use task_config::{
    parse_limit, sanitize_url, DeleteScope, SiteConfig, TaskConfig,
    DEFAULT_DOCUMENTS_TO_INDEX_LIMIT,
};
