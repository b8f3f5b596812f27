//! # Redmine Indexer Shared
//!
//! This crate defines the data structures shared between the Redmine indexer pipeline
//! and the search index backend. It includes the flat field-map document that is
//! submitted to the index and the field names and constants that identify project
//! documents inside a shared index.

pub mod types;

pub use types::fields;
pub use types::indexed_document::{FieldValue, IndexedDocument};
