//! Processor module for the Redmine indexer.
//!
//! Transforms project records into search documents.

mod date;
mod document_mapper;

pub use date::{normalize_date, INDEX_DATE_FORMAT, UPSTREAM_DATE_FORMAT};
pub use document_mapper::{extension_key, DocumentMapper, MappedBatch};
