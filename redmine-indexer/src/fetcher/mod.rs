//! Fetcher module for the Redmine indexer.
//!
//! Retrieves the project listing from the Redmine REST API.

mod messages;
mod redmine_client;

pub use messages::{decode_project_listing, ProjectListing, ProjectRecord};
pub use redmine_client::{ProjectSource, RedmineClient};
