//! Field names and fixed values of project documents.
//!
//! The names follow the dynamic-field conventions of the shared Solr schema: a
//! `_stringS` suffix stores an exact-match, non-tokenized string.

/// Item type tag of every document produced by this indexer.
pub const ITEM_TYPE: &str = "project";

/// Identifies this indexer as the source of a document.
pub const APP_KEY: &str = "EXT:solr_redmine";

/// Prefix marking Redmine projects that host an extension.
pub const EXTENSION_PREFIX: &str = "extension-";

pub const ID: &str = "id";
pub const APP_KEY_FIELD: &str = "appKey";
pub const TYPE: &str = "type";
pub const SITE_HASH: &str = "siteHash";
pub const UID: &str = "uid";
pub const PID: &str = "pid";
pub const TITLE: &str = "title";
pub const CONTENT: &str = "content";
pub const CREATED: &str = "created";
pub const CHANGED: &str = "changed";
pub const URL: &str = "url";
pub const IDENTIFIER: &str = "identifier_stringS";
pub const SITE: &str = "site";
pub const SITE_NAME: &str = "siteName_stringS";
pub const LANGUAGE: &str = "language";
pub const EXTENSION_KEY: &str = "extensionKey_stringS";
