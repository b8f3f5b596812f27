//! Loading the task configuration from environment variables.

use std::env;
use std::str::FromStr;

use redmine_indexer_repository::SolrServer;
use tracing::info;

use crate::config::registry::{ServerRegistry, SiteRegistry};
use crate::config::task_config::{SiteConfig, TaskConfig};
use crate::errors::ConfigError;

/// Default Solr scheme.
const DEFAULT_SOLR_SCHEME: &str = "http";

/// Default Solr host.
const DEFAULT_SOLR_HOST: &str = "localhost";

/// Default Solr port.
const DEFAULT_SOLR_PORT: u16 = 8983;

/// Default Solr core path.
const DEFAULT_SOLR_PATH: &str = "/solr/";

/// Default root page of the indexed site.
const DEFAULT_ROOT_PAGE_UID: u32 = 1;

impl TaskConfig {
    /// Load the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `REDMINE_SERVER`: Redmine base URL (required)
    /// - `DOCUMENTS_TO_INDEX_LIMIT`: Number of projects per run (default: 50)
    /// - `SOLR_SERVERS_FILE`: Path of a JSON server registry; when set, `SOLR_SERVER`
    ///   selects the registry key to use (required with the file)
    /// - `SOLR_SCHEME`, `SOLR_HOST`, `SOLR_PORT`, `SOLR_PATH`, `SOLR_VERIFY_TLS`,
    ///   `SOLR_ROOT_PAGE_UID`, `SOLR_LANGUAGE`: A single server, used when no registry
    ///   file is given (defaults: http, localhost, 8983, /solr/, true, 1, 0)
    /// - `SITES_FILE`: Path of a JSON file mapping root page uids to sites
    /// - `SITE_DOMAIN`, `SITE_NAME`, `SITE_ENCRYPTION_KEY`: Identity of the site served by
    ///   the selected server, registered under its root page; overrides the entry of
    ///   `SITES_FILE` for that root page. A site is required for the selected root page.
    /// - `DELETE_SCOPE`: "global" or "site" (default: global)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = TaskConfig::default();

        let redmine_server = non_empty(&lookup, "REDMINE_SERVER")
            .ok_or_else(|| ConfigError::missing("REDMINE_SERVER"))?;
        config.set_redmine_server(&redmine_server);

        if let Some(limit) = lookup("DOCUMENTS_TO_INDEX_LIMIT") {
            config.set_documents_to_index_limit(&limit);
        }

        match non_empty(&lookup, "SOLR_SERVERS_FILE") {
            Some(path) => {
                let registry = ServerRegistry::from_json_file(&path)?;
                let key = non_empty(&lookup, "SOLR_SERVER")
                    .ok_or_else(|| ConfigError::missing("SOLR_SERVER"))?;
                config.select_solr_server(&registry, &key)?;
            }
            None => config.set_solr_server(solr_server_from_lookup(&lookup)?),
        }

        if let Some(path) = non_empty(&lookup, "SITES_FILE") {
            let sites = SiteRegistry::from_json_file(&path)?;
            for (root_page_uid, site) in sites.iter() {
                config.set_site(root_page_uid, site.clone());
            }
        }

        if let Some(domain) = non_empty(&lookup, "SITE_DOMAIN") {
            let root_page_uid = config.require_solr_server()?.root_page_uid;
            config.set_site(
                root_page_uid,
                SiteConfig::new(
                    domain,
                    lookup("SITE_NAME").unwrap_or_default(),
                    lookup("SITE_ENCRYPTION_KEY").unwrap_or_default(),
                ),
            );
        }

        if let Some(scope) = non_empty(&lookup, "DELETE_SCOPE") {
            config.delete_scope = scope.parse()?;
        }

        info!(
            redmine_server = %config.redmine_server(),
            documents_to_index_limit = config.documents_to_index_limit(),
            solr_server = ?config.solr_server().map(SolrServer::registry_key),
            delete_scope = ?config.delete_scope,
            "Loaded task configuration"
        );

        Ok(config)
    }
}

fn solr_server_from_lookup<F>(lookup: &F) -> Result<SolrServer, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut server = SolrServer::new(
        non_empty(lookup, "SOLR_HOST").unwrap_or_else(|| DEFAULT_SOLR_HOST.to_string()),
        parse_or(lookup, "SOLR_ROOT_PAGE_UID", DEFAULT_ROOT_PAGE_UID)?,
        parse_or(lookup, "SOLR_LANGUAGE", 0)?,
    );
    server.scheme =
        non_empty(lookup, "SOLR_SCHEME").unwrap_or_else(|| DEFAULT_SOLR_SCHEME.to_string());
    server.port = parse_or(lookup, "SOLR_PORT", DEFAULT_SOLR_PORT)?;
    server.path = non_empty(lookup, "SOLR_PATH").unwrap_or_else(|| DEFAULT_SOLR_PATH.to_string());
    server.verify_tls = parse_or(lookup, "SOLR_VERIFY_TLS", true)?;
    Ok(server)
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(name, format!("'{}': {}", value, e))),
        None => Ok(default),
    }
}
