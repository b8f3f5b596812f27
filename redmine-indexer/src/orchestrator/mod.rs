//! Orchestrator module for the Redmine indexer.
//!
//! Runs one indexing pass: connect, clear, fetch, map, submit and commit.

use std::sync::Arc;

use async_trait::async_trait;
use redmine_indexer_repository::IndexConnector;
use tracing::{error, info, instrument};

use crate::config::TaskConfig;
use crate::fetcher::ProjectSource;
use crate::loader::SearchLoader;
use crate::processor::DocumentMapper;
use crate::IndexingError;

/// A task the host scheduler runs on every tick.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    /// Run the task once.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the run succeeded
    /// * `Ok(false)` - If the run completed but failed; the scheduler retries on its next tick
    /// * `Err(IndexingError)` - If the task could not run at all
    async fn execute(&self) -> Result<bool, IndexingError>;
}

/// How an indexing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The batch was submitted and committed.
    Indexed,
    /// No documents were produced; the clear was committed.
    NothingToIndex,
    /// The previous documents could not be deleted; nothing else was attempted.
    ClearFailed,
    /// The batch was rejected or could not be sent; nothing was committed.
    SubmissionFailed,
    /// The batch was accepted but the commit failed.
    CommitFailed,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Indexed)
    }
}

/// Summary of one indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Records returned by the project source.
    pub records_fetched: usize,
    /// Documents built from those records.
    pub documents_mapped: usize,
    /// Records dropped during mapping.
    pub records_skipped: usize,
    pub outcome: RunOutcome,
}

impl RunReport {
    fn new(outcome: RunOutcome) -> Self {
        Self {
            records_fetched: 0,
            documents_mapped: 0,
            records_skipped: 0,
            outcome,
        }
    }
}

/// Pipeline that replaces the project documents of the index with a fresh snapshot.
///
/// Each run opens its own connection and fetches fresh data, so no state is carried
/// from one run to the next. The host must not start two runs at the same time.
pub struct IndexPipeline {
    config: TaskConfig,
    connector: Arc<dyn IndexConnector>,
    source: Arc<dyn ProjectSource>,
}

impl IndexPipeline {
    /// Create a new pipeline with the given components.
    pub fn new(
        config: TaskConfig,
        connector: Arc<dyn IndexConnector>,
        source: Arc<dyn ProjectSource>,
    ) -> Self {
        Self {
            config,
            connector,
            source,
        }
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Run the pipeline once.
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The run completed; the outcome tells whether it succeeded
    /// * `Err(IndexingError)` - The configuration is invalid or the search server
    ///   could not be reached
    #[instrument(skip(self), fields(redmine_server = %self.config.redmine_server()))]
    pub async fn run(&self) -> Result<RunReport, IndexingError> {
        self.config.validate()?;
        let server = self.config.require_solr_server()?;
        let mapper = DocumentMapper::new(&self.config, server)?;
        let delete = self.config.delete_request()?;

        let provider = self.connector.connect(server).await.map_err(|e| {
            error!(
                solr_server = %server.registry_key(),
                host = %server.host,
                error = %e,
                "Failed to connect to search server"
            );
            IndexingError::Connection(e)
        })?;
        let loader = SearchLoader::new(provider);

        if loader.clear(&delete).await.is_err() {
            return Ok(finish(RunReport::new(RunOutcome::ClearFailed)));
        }

        let limit = self.config.documents_to_index_limit();
        let records = match self.source.fetch_projects(limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(url = %e.url(), error = %e, "Failed to fetch projects");
                Vec::new()
            }
        };

        let mut report = RunReport::new(RunOutcome::NothingToIndex);
        report.records_fetched = records.len();

        let batch = mapper.map_batch(records);
        report.documents_mapped = batch.documents.len();
        report.records_skipped = batch.skipped;

        if batch.documents.is_empty() {
            if loader.commit().await.is_err() {
                report.outcome = RunOutcome::CommitFailed;
            }
            return Ok(finish(report));
        }

        if loader.submit(&batch.documents).await.is_err() {
            report.outcome = RunOutcome::SubmissionFailed;
            return Ok(finish(report));
        }

        report.outcome = match loader.commit().await {
            Ok(()) => RunOutcome::Indexed,
            Err(_) => RunOutcome::CommitFailed,
        };
        Ok(finish(report))
    }
}

#[async_trait]
impl ScheduledTask for IndexPipeline {
    async fn execute(&self) -> Result<bool, IndexingError> {
        let report = self.run().await?;
        Ok(report.outcome.is_success())
    }
}

fn finish(report: RunReport) -> RunReport {
    info!(
        records_fetched = report.records_fetched,
        documents_mapped = report.documents_mapped,
        records_skipped = report.records_skipped,
        outcome = ?report.outcome,
        success = report.outcome.is_success(),
        "Indexing run finished"
    );
    report
}
