//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_infra::database::{DEFAULT_MONGODB_DATABASE, DEFAULT_MONGODB_URI, MongoConfig};

/// Which post store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Some(Self::MongoDb),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub mongodb: MongoConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store = match lookup("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown STORE_BACKEND, using mongodb");
                StoreBackend::MongoDb
            }),
            None => StoreBackend::MongoDb,
        };

        let mongodb = MongoConfig {
            uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
            max_pool_size: lookup("MONGODB_MAX_POOL_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            connect_timeout: lookup("MONGODB_CONNECT_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(10)),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store,
            mongodb,
        }
    }
}
