//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// Every field is optional on the wire so that missing fields reach the
/// request validator instead of failing deserialization. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

impl SearchQuery {
    /// The search term, treating an empty `term=` as no term at all.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.is_empty())
    }
}

/// A post as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tolerates_missing_and_unknown_fields() {
        let payload: PostPayload =
            serde_json::from_str(r#"{"title":"Hi","extra":42}"#).unwrap();
        assert_eq!(payload.title.as_deref(), Some("Hi"));
        assert!(payload.content.is_none());
        assert!(payload.tags.is_none());
    }

    #[test]
    fn test_payload_rejects_wrong_field_types() {
        let result = serde_json::from_str::<PostPayload>(r#"{"title":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_term_means_no_filter() {
        let query = SearchQuery {
            term: Some(String::new()),
        };
        assert_eq!(query.term(), None);
    }

    #[test]
    fn test_post_response_uses_camel_case_timestamps() {
        let now = Utc::now();
        let post = PostResponse {
            id: "1".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            category: "k".to_string(),
            tags: vec![],
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
