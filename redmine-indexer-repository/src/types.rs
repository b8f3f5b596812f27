//! Request and response types for search index operations.

/// Request to delete every document of one item type.
///
/// With `site_hash` set, the delete is narrowed to the documents of that site;
/// without it, documents of the type are removed for all sites sharing the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteByTypeRequest {
    /// The item type tag stored in the `type` field.
    pub item_type: String,
    /// Optional site hash restricting the delete to one site.
    pub site_hash: Option<String>,
}

impl DeleteByTypeRequest {
    /// Delete all documents of `item_type`, regardless of site.
    pub fn global(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            site_hash: None,
        }
    }

    /// Delete the documents of `item_type` that belong to one site.
    pub fn for_site(item_type: impl Into<String>, site_hash: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            site_hash: Some(site_hash.into()),
        }
    }
}

/// Raw response of a bulk add request.
///
/// The backend's verdict is kept as-is so the caller can log the complete response
/// when the submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexResponse {
    /// HTTP status code returned by the backend.
    pub status: u16,
    /// Response body, usually the backend's JSON status document.
    pub body: String,
}

impl IndexResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the backend accepted the submission (any 2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_request_scopes() {
        let global = DeleteByTypeRequest::global("project");
        assert_eq!(global.item_type, "project");
        assert!(global.site_hash.is_none());

        let scoped = DeleteByTypeRequest::for_site("project", "abc123");
        assert_eq!(scoped.site_hash.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_index_response_success() {
        assert!(IndexResponse::new(200, "").is_success());
        assert!(IndexResponse::new(204, "").is_success());
        assert!(!IndexResponse::new(400, "bad request").is_success());
        assert!(!IndexResponse::new(500, "").is_success());
    }
}
