//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A write request arrived without one or more required fields.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A record would violate its field constraints if persisted.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// The id does not have the shape the store uses for identifiers.
    #[error("Malformed identifier: {0}")]
    InvalidId(String),

    #[error("Entity not found")]
    NotFound,
}
