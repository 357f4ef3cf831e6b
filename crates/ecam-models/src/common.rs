use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Count payload. Counts are always wrapped, never a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// `?q=` on list endpoints. A non-blank value turns the list into a search.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against email, first and last name
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed query, or `None` when absent or blank.
    pub fn query(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_response_is_wrapped() {
        let json = serde_json::to_string(&CountResponse { count: 3 }).unwrap();
        assert_eq!(json, r#"{"count":3}"#);
    }

    #[test]
    fn test_search_params_blank_is_none() {
        assert_eq!(SearchParams { q: None }.query(), None);
        assert_eq!(SearchParams { q: Some("   ".into()) }.query(), None);
        assert_eq!(SearchParams { q: Some(" ali ".into()) }.query(), Some("ali"));
    }
}
