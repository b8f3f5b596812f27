//! Indexed document types for the search index.
//!
//! This module defines the document structure that is submitted to the search engine.
//! A document is a flat mapping from field name to value, serialized as a plain JSON
//! object so it can be posted to the index update handler unchanged.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::fields;

/// A single field value of an indexed document.
///
/// Serialized untagged: integers as JSON numbers, text as JSON strings and string sets
/// as JSON arrays (multi-valued fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    TextSet(BTreeSet<String>),
}

impl FieldValue {
    /// Borrow the value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Return the value as an integer, if it is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<BTreeSet<String>> for FieldValue {
    fn from(value: BTreeSet<String>) -> Self {
        Self::TextSet(value)
    }
}

/// Document representation for the search index.
///
/// Field order is stable (sorted by name), so two documents built from the same input
/// serialize to identical JSON.
///
/// # Example
///
/// ```
/// use redmine_indexer_shared::{fields, IndexedDocument};
///
/// let mut doc = IndexedDocument::new();
/// doc.set(fields::TITLE, "Apache Solr for TYPO3");
/// doc.set(fields::UID, 42i64);
///
/// assert_eq!(doc.text(fields::TITLE), Some("Apache Solr for TYPO3"));
/// assert_eq!(doc.integer(fields::UID), Some(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexedDocument {
    fields: BTreeMap<String, FieldValue>,
}

impl IndexedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get the raw value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Get an integer field.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The unique document ID used in the search index.
    pub fn document_id(&self) -> Option<&str> {
        self.text(fields::ID)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in field-name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}
