//! Error translation - maps pipeline and store failures to HTTP responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use blog_core::domain::PostDraft;
use blog_core::pipeline::{RequestValidator, Stage};
use blog_core::{DomainError, RepoError};
use blog_shared::{ApiResponse, ErrorResponse, FieldErrors, ValidationErrors};
use std::fmt;

/// Message used by every not-found response.
pub const POST_NOT_FOUND: &str = "Post not found";

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Rejected by the request validator, or not a well-formed body: 400 `{ errors }`.
    Rejected(Vec<String>),
    /// Storage field validation failed: 400 `{ error }`.
    Validation(Vec<String>),
    /// No post with the requested id: 404 envelope.
    NotFound,
    /// Anything else. Logged, answered with a bare 500.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Rejected(errors) => write!(f, "Request rejected: {:?}", errors),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::NotFound => write!(f, "{}", POST_NOT_FOUND),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Rejected(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Rejected(errors) => response.json(FieldErrors {
                errors: errors.clone(),
            }),
            AppError::Validation(errors) => response.json(ValidationErrors {
                error: errors.clone(),
            }),
            AppError::NotFound => response.json(ApiResponse::<()>::not_found(POST_NOT_FOUND)),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                response.json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingFields(errors) => AppError::Rejected(errors),
            DomainError::Validation(errors) => AppError::Validation(errors),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            // Malformed ids are not translated to 400/404; they surface as faults.
            RepoError::InvalidId(id) => {
                tracing::warn!(id = %id, "Malformed post id");
                AppError::Internal(format!("Malformed post id: {}", id))
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Bodies that are not JSON objects of the expected field types are rejected
/// the same way as bodies with missing fields.
///
/// A write with no JSON body at all (no payload, or a non-JSON content type)
/// is read as `{}`, so the request validator reports every required field.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);

    if is_absent_body(&err) {
        if let Err(missing) = RequestValidator.run(PostDraft::default()) {
            return AppError::from(missing).into();
        }
    }

    AppError::Rejected(vec![err.to_string()]).into()
}

fn is_absent_body(err: &JsonPayloadError) -> bool {
    match err {
        JsonPayloadError::ContentType => true,
        // EOF before the first byte: the payload was empty.
        JsonPayloadError::Deserialize(e) => e.is_eof() && e.line() == 1 && e.column() == 0,
        _ => false,
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
