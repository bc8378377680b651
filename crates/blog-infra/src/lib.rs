//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB document store

pub mod database;

// Re-exports
pub use database::{InMemoryPostRepository, MongoConfig};

#[cfg(feature = "mongodb")]
pub use database::MongoPostRepository;
