//! Message types for the fetcher.
//!
//! Defines the project records returned by the Redmine projects API.

use serde::{Deserialize, Deserializer};

/// A project as listed by Redmine.
///
/// Dates keep the upstream representation (`YYYY/MM/DD H:MM:SS ±HHMM`); they are
/// normalized when the record is mapped to a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    /// Numeric project id.
    pub id: i64,
    /// URL-safe project slug.
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Project description, empty when Redmine has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub created_on: String,
    pub updated_on: String,
}

impl ProjectRecord {
    /// Create a new project record.
    pub fn new(
        id: i64,
        identifier: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        created_on: impl Into<String>,
        updated_on: impl Into<String>,
    ) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            name: name.into(),
            description: description.into(),
            created_on: created_on.into(),
            updated_on: updated_on.into(),
        }
    }
}

/// Body of `GET projects.json`.
///
/// Redmine lists projects alphabetically by name; the paging fields are informational.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListing {
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a project listing from a response body.
pub fn decode_project_listing(body: &str) -> Result<ProjectListing, serde_json::Error> {
    serde_json::from_str(body)
}
