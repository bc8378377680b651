//! # Blog Core
//!
//! The domain layer of the blog posts API.
//! This crate contains the post model, its field rules and the write pipeline,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;

pub use error::{DomainError, RepoError};
