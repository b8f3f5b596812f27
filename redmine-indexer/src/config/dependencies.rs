//! Dependency initialization and wiring for the Redmine indexer.

use std::sync::Arc;

use redmine_indexer_repository::SolrConnector;
use tracing::info;

use crate::config::TaskConfig;
use crate::errors::ConfigError;
use crate::fetcher::RedmineClient;
use crate::orchestrator::IndexPipeline;
use crate::IndexingError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured pipeline ready to run.
    pub pipeline: IndexPipeline,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`TaskConfig::from_env`] for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the configuration is incomplete or invalid
    pub fn new() -> Result<Self, IndexingError> {
        let config = TaskConfig::from_env()?;
        Self::from_config(config)
    }

    /// Wire the production components for an already loaded configuration.
    ///
    /// No network activity happens here; the search server is contacted when the
    /// pipeline runs.
    pub fn from_config(config: TaskConfig) -> Result<Self, IndexingError> {
        let source = RedmineClient::new(config.redmine_server())
            .map_err(|e| ConfigError::invalid("REDMINE_SERVER", e.to_string()))?;

        info!(
            redmine_server = %source.base_url(),
            "Redmine client created"
        );

        let pipeline = IndexPipeline::new(config, Arc::new(SolrConnector::new()), Arc::new(source));

        Ok(Self { pipeline })
    }
}
