//! Registry of the Solr servers available to indexing tasks.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use redmine_indexer_repository::SolrServer;
use serde::Deserialize;

use crate::config::task_config::SiteConfig;
use crate::errors::ConfigError;

/// The Solr connections registered by the host system, keyed by registry key.
///
/// Stored as a JSON object mapping each key to its server entry:
///
/// ```json
/// {
///   "1|0": { "host": "localhost", "port": 8983, "path": "/solr/core_en/", "rootPageUid": 1 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServerRegistry {
    servers: BTreeMap<String, SolrServer>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a registry from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::registry(e.to_string()))
    }

    /// Read and decode a registry file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ConfigError::registry(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Register a server under its own registry key, replacing any previous entry.
    pub fn insert(&mut self, server: SolrServer) {
        self.servers.insert(server.registry_key(), server);
    }

    pub fn get(&self, key: &str) -> Option<&SolrServer> {
        self.servers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.servers.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Sites keyed by the uid of their root page.
///
/// Stored as a JSON object:
///
/// ```json
/// {
///   "1": { "domain": "typo3.org", "name": "TYPO3", "encryptionKey": "..." }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SiteRegistry {
    sites: BTreeMap<u32, SiteConfig>,
}

impl SiteRegistry {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::registry(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ConfigError::registry(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, root_page_uid: u32) -> Option<&SiteConfig> {
        self.sites.get(&root_page_uid)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Registered sites in root page order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SiteConfig)> {
        self.sites.iter().map(|(uid, site)| (*uid, site))
    }
}
