//! This module defines the core data structures used across the Redmine indexer.
//! It re-exports the `IndexedDocument` type and the field name constants.

pub mod fields;
pub mod indexed_document;

pub use indexed_document::{FieldValue, IndexedDocument};
