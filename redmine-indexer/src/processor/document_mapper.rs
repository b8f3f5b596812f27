//! Document mapper implementation.
//!
//! Transforms Redmine project records into documents for the search index.

use redmine_indexer_repository::{document_id, site_hash, SolrServer};
use redmine_indexer_shared::{fields, IndexedDocument};
use tracing::{debug, instrument, warn};

use crate::config::TaskConfig;
use crate::errors::{ConfigError, ParseError};
use crate::fetcher::ProjectRecord;
use crate::processor::date::normalize_date;

/// Result of mapping a batch of project records.
#[derive(Debug, Default)]
pub struct MappedBatch {
    /// Documents ready for submission, in upstream order.
    pub documents: Vec<IndexedDocument>,
    /// Number of records dropped because a value could not be parsed.
    pub skipped: usize,
}

/// Mapper from project records to indexed documents.
///
/// Captures the per-run values (site hash, root page, language and the Redmine base
/// URL) once, so mapping a record is a pure function of the record. The site is the
/// one registered for the server's root page.
#[derive(Debug, Clone)]
pub struct DocumentMapper {
    redmine_server: String,
    site_hash: String,
    root_page_uid: u32,
    language: u32,
    site_domain: String,
    site_name: String,
}

impl DocumentMapper {
    /// Create a mapper for documents written to `server`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSite` if no site is registered for the server's
    /// root page.
    pub fn new(config: &TaskConfig, server: &SolrServer) -> Result<Self, ConfigError> {
        let site = config
            .site(server.root_page_uid)
            .ok_or(ConfigError::UnknownSite(server.root_page_uid))?;

        Ok(Self {
            redmine_server: config.redmine_server().to_string(),
            site_hash: site_hash(&site.domain, &site.encryption_key),
            root_page_uid: server.root_page_uid,
            language: server.language,
            site_domain: site.domain.clone(),
            site_name: site.name.clone(),
        })
    }

    /// Map a single project record.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `created_on` or `updated_on` is not a valid
    /// upstream timestamp.
    pub fn map(&self, record: &ProjectRecord) -> Result<IndexedDocument, ParseError> {
        let created = normalize_date(&record.created_on)?;
        let changed = normalize_date(&record.updated_on)?;

        let mut doc = IndexedDocument::new();
        doc.set(
            fields::ID,
            document_id(
                &self.site_hash,
                fields::ITEM_TYPE,
                self.root_page_uid,
                record.id,
            ),
        );
        doc.set(fields::APP_KEY_FIELD, fields::APP_KEY);
        doc.set(fields::TYPE, fields::ITEM_TYPE);
        doc.set(fields::SITE_HASH, self.site_hash.as_str());
        doc.set(fields::UID, record.id);
        doc.set(fields::PID, self.root_page_uid);
        doc.set(fields::TITLE, record.name.as_str());
        doc.set(fields::CONTENT, record.description.as_str());
        doc.set(fields::CREATED, created);
        doc.set(fields::CHANGED, changed);
        doc.set(
            fields::URL,
            format!("{}projects/{}", self.redmine_server, record.identifier),
        );
        doc.set(fields::IDENTIFIER, record.identifier.as_str());
        doc.set(fields::SITE, self.site_domain.as_str());
        doc.set(fields::SITE_NAME, self.site_name.as_str());
        doc.set(fields::LANGUAGE, self.language);

        if let Some(key) = extension_key(&record.identifier) {
            doc.set(fields::EXTENSION_KEY, key);
        }

        Ok(doc)
    }

    /// Map a batch of project records.
    ///
    /// Records that fail to map are logged and skipped; the others keep their order.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn map_batch(&self, records: Vec<ProjectRecord>) -> MappedBatch {
        let mut batch = MappedBatch {
            documents: Vec::with_capacity(records.len()),
            skipped: 0,
        };

        for record in &records {
            match self.map(record) {
                Ok(doc) => batch.documents.push(doc),
                Err(e) => {
                    warn!(
                        project_id = record.id,
                        identifier = %record.identifier,
                        error = %e,
                        "Skipping project with unparsable value"
                    );
                    batch.skipped += 1;
                }
            }
        }

        debug!(
            mapped = batch.documents.len(),
            skipped = batch.skipped,
            "Mapped project batch"
        );
        batch
    }
}

/// Extension key of a project hosting an extension.
///
/// Returns the identifier without the `extension-` prefix, or `None` if the prefix is
/// absent or nothing follows it.
///
/// # Example
///
/// ```
/// use redmine_indexer::processor::extension_key;
///
/// assert_eq!(extension_key("extension-solr_redmine"), Some("solr_redmine"));
/// assert_eq!(extension_key("core"), None);
/// ```
pub fn extension_key(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(fields::EXTENSION_PREFIX)
        .filter(|key| !key.is_empty())
}
