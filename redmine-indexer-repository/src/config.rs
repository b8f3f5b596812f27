//! Connection parameters of a Solr server.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::SearchIndexError;

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_PORT: u16 = 8983;
const DEFAULT_PATH: &str = "/solr/";

/// Connection parameters of one Solr core, as registered by the host system.
///
/// Besides the endpoint, a server entry carries the site (`root_page_uid`) and the
/// language whose documents it holds. The pair identifies the entry in the host's
/// server registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolrServer {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
    /// Verify the server's TLS certificate for `https` connections.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Root page of the site the core serves.
    pub root_page_uid: u32,
    /// Language uid of the documents held by the core.
    #[serde(default)]
    pub language: u32,
    /// Human-readable label shown when selecting a server.
    #[serde(default)]
    pub label: String,
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_verify_tls() -> bool {
    true
}

impl SolrServer {
    /// Create a server entry with default scheme, port and path.
    pub fn new(host: impl Into<String>, root_page_uid: u32, language: u32) -> Self {
        Self {
            scheme: default_scheme(),
            host: host.into(),
            port: DEFAULT_PORT,
            path: default_path(),
            verify_tls: true,
            root_page_uid,
            language,
            label: String::new(),
        }
    }

    /// The key identifying this server in the host's registry: `{root_page_uid}|{language}`.
    pub fn registry_key(&self) -> String {
        format!("{}|{}", self.root_page_uid, self.language)
    }

    /// Build the base URL of the core, always ending with `/`.
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - e.g. `http://localhost:8983/solr/core_en/`
    /// * `Err(SearchIndexError)` - If the parameters do not form a valid URL
    pub fn core_url(&self) -> Result<Url, SearchIndexError> {
        if self.host.trim().is_empty() {
            return Err(SearchIndexError::validation("Solr host is required"));
        }

        let trimmed = self.path.trim_matches('/');
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };

        let raw = format!("{}://{}:{}{}", self.scheme, self.host.trim(), self.port, path);
        Url::parse(&raw).map_err(|e| {
            SearchIndexError::validation(format!("Invalid Solr server URL '{}': {}", raw, e))
        })
    }
}
