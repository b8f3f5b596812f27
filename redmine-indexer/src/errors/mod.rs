//! Error types for the Redmine indexer.
//!
//! Only configuration and connection failures abort a run. Fetch, parse and
//! index failures are logged and turned into an unsuccessful run result.

use thiserror::Error;

/// Errors in the task configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is missing or empty.
    #[error("Missing configuration value: {0}")]
    MissingValue(String),

    /// A setting has a value that cannot be used.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// The selected Solr server is not in the server registry.
    #[error("Unknown Solr server: {0}")]
    UnknownServer(String),

    /// No site is registered for the root page of the selected Solr server.
    #[error("No site configured for root page {0}")]
    UnknownSite(u32),

    /// The server registry could not be read or decoded.
    #[error("Server registry error: {0}")]
    RegistryError(String),
}

impl ConfigError {
    /// Create a missing value error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingValue(name.into())
    }

    /// Create an invalid value error.
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a registry error.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::RegistryError(msg.into())
    }
}

/// Errors fetching the project listing from Redmine.
///
/// Every variant carries the request URL for diagnostics.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the response not read.
    #[error("HTTP error requesting {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Redmine answered with a non-success status.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// Redmine answered with an empty body.
    #[error("Empty response from {url}")]
    EmptyBody { url: String },

    /// The body is not a valid project listing.
    #[error("Invalid project listing from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// The URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Status { url, .. }
            | Self::EmptyBody { url }
            | Self::Decode { url, .. } => url,
        }
    }
}

/// Error parsing a value of an upstream record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A date-time value does not match the upstream format.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },
}

impl ParseError {
    /// Create an invalid date error.
    pub fn invalid_date(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Errors writing to the search index during a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Deleting the previous documents failed.
    #[error("Clear error: {0}")]
    ClearError(String),

    /// The document batch was not accepted.
    #[error("Submission error (status {status:?}): {message}")]
    SubmissionError {
        /// Status returned by the backend, `None` if no response was received.
        status: Option<u16>,
        message: String,
    },

    /// Committing the changes failed.
    #[error("Commit error: {0}")]
    CommitError(String),
}

impl IngestError {
    /// Create a clear error.
    pub fn clear(msg: impl Into<String>) -> Self {
        Self::ClearError(msg.into())
    }

    /// Create a submission error.
    pub fn submission(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::SubmissionError {
            status,
            message: msg.into(),
        }
    }

    /// Create a commit error.
    pub fn commit(msg: impl Into<String>) -> Self {
        Self::CommitError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_url() {
        let err = FetchError::EmptyBody {
            url: "http://forge.example.org/projects.json?limit=50".to_string(),
        };
        assert_eq!(err.url(), "http://forge.example.org/projects.json?limit=50");

        let err = FetchError::Status {
            url: "http://a/".to_string(),
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.url(), "http://a/");
        assert_eq!(
            err.to_string(),
            "Request to http://a/ failed with status 503: down"
        );
    }

    #[test]
    fn test_submission_error_display() {
        let err = IngestError::submission(Some(500), "Internal Server Error");
        assert_eq!(
            err.to_string(),
            "Submission error (status Some(500)): Internal Server Error"
        );
    }
}
