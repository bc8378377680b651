//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful response and the 404 of single-post
/// reads and updates: `{ status, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    /// Serialized as `null` when absent.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(200, Some(data), "")
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self::new(200, Some(data), message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, Some(data), message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, None, message)
    }
}

/// Rejection from the request validator: `{ "errors": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrors {
    pub errors: Vec<String>,
}

/// Storage validation failure: `{ "error": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub error: Vec<String>,
}

/// Bare error object used by `DELETE /posts/{id}`: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// RFC 7807 Problem Details, used for server faults.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
        }
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<String>::not_found("Post not found")).unwrap();
        assert_eq!(
            body,
            json!({ "status": 404, "message": "Post not found", "data": null })
        );
    }

    #[test]
    fn test_ok_envelope_has_empty_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "status": 200, "message": "", "data": [1, 2] }));
    }

    #[test]
    fn test_error_bodies_use_distinct_keys() {
        let missing = FieldErrors {
            errors: vec!["Title is required".to_string()],
        };
        let invalid = ValidationErrors {
            error: vec!["Title is required".to_string()],
        };
        assert_eq!(
            serde_json::to_value(missing).unwrap(),
            json!({ "errors": ["Title is required"] })
        );
        assert_eq!(
            serde_json::to_value(invalid).unwrap(),
            json!({ "error": ["Title is required"] })
        );
        assert_eq!(
            serde_json::to_value(ErrorMessage::new("Post not found")).unwrap(),
            json!({ "error": "Post not found" })
        );
    }

    #[test]
    fn test_internal_error_problem_details() {
        let body = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert_eq!(
            body,
            json!({ "type": "about:blank", "title": "Internal Server Error", "status": 500 })
        );
    }
}
