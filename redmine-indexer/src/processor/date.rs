//! Date normalization for upstream timestamps.

use chrono::{DateTime, Utc};

use crate::errors::ParseError;

/// Format of Redmine timestamps, e.g. `2011/04/18 21:03:00 +0200`.
pub const UPSTREAM_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

/// Format of index timestamps, e.g. `2011-04-18T19:03:00Z`.
pub const INDEX_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Convert a Redmine timestamp into an ISO-8601 UTC timestamp.
///
/// The offset of the input is applied, so the output denotes the same instant.
///
/// # Example
///
/// ```
/// use redmine_indexer::processor::normalize_date;
///
/// assert_eq!(
///     normalize_date("2011/04/18 21:03:00 +0200").unwrap(),
///     "2011-04-18T19:03:00Z"
/// );
/// assert!(normalize_date("not-a-date").is_err());
/// ```
pub fn normalize_date(value: &str) -> Result<String, ParseError> {
    let parsed = DateTime::parse_from_str(value.trim(), UPSTREAM_DATE_FORMAT)
        .map_err(|e| ParseError::invalid_date(value, e.to_string()))?;

    Ok(parsed
        .with_timezone(&Utc)
        .format(INDEX_DATE_FORMAT)
        .to_string())
}
