//! Post stores - MongoDB and in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connections::{DEFAULT_MONGODB_DATABASE, DEFAULT_MONGODB_URI, MongoConfig};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoPostRepository;
