//! # Blog Shared
//!
//! Wire types shared by the server and its clients: request bodies, the
//! response envelope and error bodies.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorMessage, ErrorResponse, FieldErrors, ValidationErrors};
