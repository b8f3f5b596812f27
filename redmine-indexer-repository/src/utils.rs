//! Utility functions for the Redmine indexer repository.

use sha1::{Digest, Sha1};

/// Suffix mixed into every site hash so hashes differ from other uses of the key.
const SITE_HASH_SALT: &str = "tx_solr";

/// Compute the hash that partitions documents by site within a shared index.
///
/// The hash is derived from the site's domain and the installation's encryption key,
/// so every indexer writing for the same site produces the same value. The recipe
/// matches the one the TYPO3 `tx_solr` extension uses, so documents written here share
/// the site partition of documents indexed by the CMS itself.
///
/// # Arguments
///
/// * `domain` - The site's domain (e.g., "typo3.org")
/// * `encryption_key` - The installation secret
///
/// # Returns
///
/// The lowercase hex encoded SHA-1 digest (40 characters).
///
/// # Example
///
/// ```
/// use redmine_indexer_repository::site_hash;
///
/// let hash = site_hash("typo3.org", "secret");
/// assert_eq!(hash.len(), 40);
/// assert_eq!(hash, site_hash("typo3.org", "secret"));
/// ```
pub fn site_hash(domain: &str, encryption_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(domain.as_bytes());
    hasher.update(encryption_key.as_bytes());
    hasher.update(SITE_HASH_SALT.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a document ID from the site, item type, page and record identifiers.
///
/// Uses format: `{site_hash}/{item_type}/{pid}/{uid}` so IDs are unique per
/// site, type and record.
pub fn document_id(site_hash: &str, item_type: &str, pid: u32, uid: i64) -> String {
    format!("{}/{}/{}/{}", site_hash, item_type, pid, uid)
}
