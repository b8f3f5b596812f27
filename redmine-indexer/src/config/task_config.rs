//! Task configuration.
//!
//! Holds the settings of one scheduled indexing task: where to fetch projects from,
//! which Solr server to write to, how many projects to index, and the identity of the
//! sites the documents can belong to.

use std::collections::BTreeMap;
use std::str::FromStr;

use redmine_indexer_repository::{site_hash, DeleteByTypeRequest, SolrServer};
use redmine_indexer_shared::fields;
use serde::Deserialize;
use url::Url;

use crate::config::registry::ServerRegistry;
use crate::errors::ConfigError;

/// Number of projects fetched per run when no limit is configured.
pub const DEFAULT_DOCUMENTS_TO_INDEX_LIMIT: u32 = 50;

/// Which documents are removed before a run adds the fresh batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteScope {
    /// All project documents in the index, whatever site they belong to.
    #[default]
    Global,
    /// Only the project documents of the configured site.
    Site,
}

impl FromStr for DeleteScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "site" => Ok(Self::Site),
            other => Err(ConfigError::invalid(
                "DELETE_SCOPE",
                format!("expected 'global' or 'site', got '{}'", other),
            )),
        }
    }
}

/// Identity of the site the indexed documents are attached to.
///
/// A site is reached through its root page; the site hash is derived from the domain
/// and the installation secret, the same way the host computes it for its own documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Domain of the site, stored in the `site` field.
    pub domain: String,
    /// Display name of the site, stored in `siteName_stringS`.
    #[serde(default)]
    pub name: String,
    /// Installation secret mixed into the site hash.
    #[serde(default)]
    pub encryption_key: String,
}

impl SiteConfig {
    pub fn new(
        domain: impl Into<String>,
        name: impl Into<String>,
        encryption_key: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
            encryption_key: encryption_key.into(),
        }
    }
}

/// Configuration of the indexing task.
///
/// The Redmine server URL is always stored sanitized and slash-terminated, and the
/// document limit is always a non-negative integer, whatever the setters receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    redmine_server: String,
    solr_server: Option<SolrServer>,
    documents_to_index_limit: u32,
    /// Sites keyed by their root page uid.
    sites: BTreeMap<u32, SiteConfig>,
    /// Scope of the delete issued before adding documents.
    pub delete_scope: DeleteScope,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            redmine_server: String::new(),
            solr_server: None,
            documents_to_index_limit: DEFAULT_DOCUMENTS_TO_INDEX_LIMIT,
            sites: BTreeMap::new(),
            delete_scope: DeleteScope::Global,
        }
    }
}

impl TaskConfig {
    /// Create a configuration for the given Redmine server and Solr server.
    pub fn new(redmine_server: &str, solr_server: SolrServer) -> Self {
        let mut config = Self::default();
        config.set_redmine_server(redmine_server);
        config.set_solr_server(solr_server);
        config
    }

    /// The sanitized Redmine base URL, ending with `/` unless empty.
    pub fn redmine_server(&self) -> &str {
        &self.redmine_server
    }

    /// Set the Redmine base URL.
    ///
    /// Characters that cannot appear in a URL are dropped and a trailing `/` is
    /// appended when missing.
    pub fn set_redmine_server(&mut self, raw: &str) {
        let mut sanitized = sanitize_url(raw);
        if !sanitized.is_empty() && !sanitized.ends_with('/') {
            sanitized.push('/');
        }
        self.redmine_server = sanitized;
    }

    pub fn solr_server(&self) -> Option<&SolrServer> {
        self.solr_server.as_ref()
    }

    pub fn set_solr_server(&mut self, server: SolrServer) {
        self.solr_server = Some(server);
    }

    /// Select the Solr server registered under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the key is registered; the server is now selected
    /// * `Err(ConfigError::UnknownServer)` - If it is not; the selection is unchanged
    pub fn select_solr_server(
        &mut self,
        registry: &ServerRegistry,
        key: &str,
    ) -> Result<(), ConfigError> {
        let server = registry
            .get(key)
            .ok_or_else(|| ConfigError::UnknownServer(key.to_string()))?;
        self.solr_server = Some(server.clone());
        Ok(())
    }

    pub fn documents_to_index_limit(&self) -> u32 {
        self.documents_to_index_limit
    }

    /// Set the document limit from user input. See [`parse_limit`].
    pub fn set_documents_to_index_limit(&mut self, raw: &str) {
        self.documents_to_index_limit = parse_limit(raw);
    }

    /// Builder-style variant of [`TaskConfig::set_documents_to_index_limit`] for a known value.
    pub fn with_documents_to_index_limit(mut self, limit: u32) -> Self {
        self.documents_to_index_limit = limit;
        self
    }

    /// Register the site whose root page is `root_page_uid`, replacing any previous one.
    pub fn set_site(&mut self, root_page_uid: u32, site: SiteConfig) {
        self.sites.insert(root_page_uid, site);
    }

    pub fn with_site(mut self, root_page_uid: u32, site: SiteConfig) -> Self {
        self.set_site(root_page_uid, site);
        self
    }

    /// The site registered for `root_page_uid`.
    pub fn site(&self, root_page_uid: u32) -> Option<&SiteConfig> {
        self.sites.get(&root_page_uid)
    }

    /// The site served by the selected Solr server.
    ///
    /// # Returns
    ///
    /// * `Ok(&SiteConfig)` - The site registered for the server's root page
    /// * `Err(ConfigError)` - If no server is selected, no site is registered for its
    ///   root page, or the site has no domain
    pub fn require_site(&self) -> Result<&SiteConfig, ConfigError> {
        let root_page_uid = self.require_solr_server()?.root_page_uid;
        let site = self
            .site(root_page_uid)
            .ok_or(ConfigError::UnknownSite(root_page_uid))?;
        if site.domain.trim().is_empty() {
            return Err(ConfigError::invalid(
                "site",
                format!("no domain for root page {}", root_page_uid),
            ));
        }
        Ok(site)
    }

    pub fn with_delete_scope(mut self, scope: DeleteScope) -> Self {
        self.delete_scope = scope;
        self
    }

    /// The selected Solr server, or an error if none is selected.
    pub fn require_solr_server(&self) -> Result<&SolrServer, ConfigError> {
        self.solr_server
            .as_ref()
            .ok_or_else(|| ConfigError::missing("solr server"))
    }

    /// Check the configuration is complete and usable.
    ///
    /// Runs before any network activity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redmine_server.is_empty() {
            return Err(ConfigError::missing("redmine server"));
        }

        let url = Url::parse(&self.redmine_server)
            .map_err(|e| ConfigError::invalid("redmine server", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "redmine server",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let server = self.require_solr_server()?;
        server
            .core_url()
            .map_err(|e| ConfigError::invalid("solr server", e.to_string()))?;

        self.require_site()?;
        self.check_distinct_domains()
    }

    /// Two root pages sharing a domain would share a site hash.
    fn check_distinct_domains(&self) -> Result<(), ConfigError> {
        let mut seen: BTreeMap<&str, u32> = BTreeMap::new();
        for (root_page_uid, site) in &self.sites {
            if let Some(other) = seen.insert(site.domain.as_str(), *root_page_uid) {
                return Err(ConfigError::invalid(
                    "site",
                    format!(
                        "domain '{}' is used by root pages {} and {}",
                        site.domain, other, root_page_uid
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Hash of the site served by the selected Solr server.
    pub fn site_hash(&self) -> Result<String, ConfigError> {
        let site = self.require_site()?;
        Ok(site_hash(&site.domain, &site.encryption_key))
    }

    /// The delete issued at the start of a run, according to the delete scope.
    pub fn delete_request(&self) -> Result<DeleteByTypeRequest, ConfigError> {
        Ok(match self.delete_scope {
            DeleteScope::Global => DeleteByTypeRequest::global(fields::ITEM_TYPE),
            DeleteScope::Site => {
                DeleteByTypeRequest::for_site(fields::ITEM_TYPE, self.site_hash()?)
            }
        })
    }
}

/// Remove every character that is not allowed in a URL.
///
/// Keeps ASCII letters, digits and `$-_.+!*'(),{}|\^~[]`<>#%";/?:@&=`.
pub fn sanitize_url(raw: &str) -> String {
    const ALLOWED: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED.contains(*c))
        .collect()
}

/// Parse a document limit the lenient way a form field is read.
///
/// Leading whitespace and an optional sign are accepted, followed by the leading run
/// of digits; anything after it is ignored. Input without leading digits and
/// negative numbers yield 0, values above `u32::MAX` saturate.
///
/// # Example
///
/// ```
/// use redmine_indexer::config::parse_limit;
///
/// assert_eq!(parse_limit("25"), 25);
/// assert_eq!(parse_limit(" 12abc"), 12);
/// assert_eq!(parse_limit("-5"), 0);
/// assert_eq!(parse_limit("abc"), 0);
/// ```
pub fn parse_limit(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digit_count == 0 {
        return 0;
    }

    rest[..digit_count].parse::<u32>().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solr_server() -> SolrServer {
        SolrServer::new("localhost", 1, 0)
    }

    fn site() -> SiteConfig {
        SiteConfig::new("typo3.org", "TYPO3", "key")
    }

    #[test]
    fn test_redmine_server_is_slash_terminated() {
        let mut config = TaskConfig::default();

        config.set_redmine_server("http://example.com");
        assert_eq!(config.redmine_server(), "http://example.com/");

        config.set_redmine_server("http://example.com/");
        assert_eq!(config.redmine_server(), "http://example.com/");

        config.set_redmine_server("https://forge.typo3.org/redmine");
        assert_eq!(config.redmine_server(), "https://forge.typo3.org/redmine/");
    }

    #[test]
    fn test_redmine_server_is_sanitized() {
        let mut config = TaskConfig::default();
        config.set_redmine_server(" http://exa mple.com/\u{e9}\n");
        assert_eq!(config.redmine_server(), "http://example.com/");
    }

    #[test]
    fn test_empty_redmine_server_stays_empty() {
        let mut config = TaskConfig::default();
        config.set_redmine_server("   ");
        assert_eq!(config.redmine_server(), "");
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(
            TaskConfig::default().documents_to_index_limit(),
            DEFAULT_DOCUMENTS_TO_INDEX_LIMIT
        );
    }

    #[test]
    fn test_limit_setter_coerces_input() {
        let mut config = TaskConfig::default();

        config.set_documents_to_index_limit("-5");
        assert_eq!(config.documents_to_index_limit(), 0);

        config.set_documents_to_index_limit("abc");
        assert_eq!(config.documents_to_index_limit(), 0);

        config.set_documents_to_index_limit("120");
        assert_eq!(config.documents_to_index_limit(), 120);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("0"), 0);
        assert_eq!(parse_limit("+7"), 7);
        assert_eq!(parse_limit("  42  "), 42);
        assert_eq!(parse_limit("3.9"), 3);
        assert_eq!(parse_limit(""), 0);
        assert_eq!(parse_limit("-"), 0);
        assert_eq!(parse_limit("-0"), 0);
        assert_eq!(parse_limit("99999999999999"), u32::MAX);
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config =
            TaskConfig::new("http://forge.example.org", solr_server()).with_site(1, site());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_site_of_selected_root_page() {
        let config =
            TaskConfig::new("http://forge.example.org", solr_server()).with_site(2, site());
        assert_eq!(config.validate(), Err(ConfigError::UnknownSite(1)));

        let config = TaskConfig::new("http://forge.example.org", solr_server())
            .with_site(1, SiteConfig::new(" ", "TYPO3", "key"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_shared_domain() {
        let config = TaskConfig::new("http://forge.example.org", solr_server())
            .with_site(1, site())
            .with_site(2, SiteConfig::new("typo3.org", "Other", "key"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_requires_redmine_server() {
        let mut config = TaskConfig::default();
        config.set_solr_server(solr_server());
        assert_eq!(
            config.validate(),
            Err(ConfigError::missing("redmine server"))
        );
    }

    #[test]
    fn test_validate_rejects_relative_or_non_http_url() {
        let mut config = TaskConfig::new("forge.example.org", solr_server());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        config.set_redmine_server("ftp://forge.example.org");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_requires_solr_server() {
        let mut config = TaskConfig::default();
        config.set_redmine_server("http://forge.example.org");
        assert_eq!(config.validate(), Err(ConfigError::missing("solr server")));
    }

    #[test]
    fn test_select_solr_server() {
        let mut registry = ServerRegistry::new();
        registry.insert(SolrServer::new("solr-a", 1, 0));

        let mut config = TaskConfig::default();
        assert!(config.select_solr_server(&registry, "1|0").is_ok());
        assert_eq!(config.solr_server().map(|s| s.host.as_str()), Some("solr-a"));

        assert_eq!(
            config.select_solr_server(&registry, "2|0"),
            Err(ConfigError::UnknownServer("2|0".to_string()))
        );
        assert_eq!(config.solr_server().map(|s| s.host.as_str()), Some("solr-a"));
    }

    #[test]
    fn test_delete_request_follows_scope() {
        let config =
            TaskConfig::new("http://forge.example.org", solr_server()).with_site(1, site());

        let global = config.delete_request();
        assert_eq!(global, Ok(DeleteByTypeRequest::global("project")));

        let scoped = config.with_delete_scope(DeleteScope::Site);
        assert_eq!(
            scoped.delete_request(),
            Ok(DeleteByTypeRequest::for_site(
                "project",
                site_hash("typo3.org", "key")
            ))
        );
    }

    #[test]
    fn test_site_hash_follows_root_page() {
        let mut config = TaskConfig::new("http://forge.example.org", solr_server())
            .with_site(1, site())
            .with_site(2, SiteConfig::new("forge.typo3.org", "Forge", "key"))
            .with_delete_scope(DeleteScope::Site);

        let first_hash = config.site_hash().unwrap();
        let first_delete = config.delete_request().unwrap();

        config.set_solr_server(SolrServer::new("localhost", 2, 0));
        let second_hash = config.site_hash().unwrap();
        let second_delete = config.delete_request().unwrap();

        assert_ne!(first_hash, second_hash);
        assert_ne!(first_delete, second_delete);
        assert_eq!(second_delete.site_hash, Some(second_hash));
    }

    #[test]
    fn test_site_hash_without_site_is_an_error() {
        let config = TaskConfig::new("http://forge.example.org", solr_server())
            .with_delete_scope(DeleteScope::Site);
        assert_eq!(config.site_hash(), Err(ConfigError::UnknownSite(1)));
        assert_eq!(config.delete_request(), Err(ConfigError::UnknownSite(1)));
    }

    #[test]
    fn test_delete_scope_from_str() {
        assert_eq!("global".parse::<DeleteScope>(), Ok(DeleteScope::Global));
        assert_eq!(" Site ".parse::<DeleteScope>(), Ok(DeleteScope::Site));
        assert!("tenant".parse::<DeleteScope>().is_err());
    }
}
