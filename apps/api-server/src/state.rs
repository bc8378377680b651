//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::RepoError;
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
use blog_infra::MongoPostRepository;

use crate::config::{AppConfig, StoreBackend};

/// Shared application state.
///
/// Holds the single store handle opened at startup. Cloning shares it.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Wrap an already constructed store.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::new()))
    }

    /// Open the configured store. A store that cannot be reached is fatal.
    pub async fn connect(config: &AppConfig) -> Result<Self, RepoError> {
        let state = match config.store {
            #[cfg(feature = "mongodb")]
            StoreBackend::MongoDb => {
                let repo = MongoPostRepository::connect(&config.mongodb).await?;
                Self::new(Arc::new(repo))
            }
            #[cfg(not(feature = "mongodb"))]
            StoreBackend::MongoDb => {
                tracing::warn!(
                    "Built without mongodb feature - using in-memory store instead"
                );
                Self::in_memory()
            }
            StoreBackend::Memory => {
                tracing::warn!("Running with in-memory store. Data is lost on restart.");
                Self::in_memory()
            }
        };

        tracing::info!(store = ?config.store, "Application state initialized");
        Ok(state)
    }

    /// Close the store. Called once after the HTTP server stops.
    pub async fn shutdown(&self) {
        if let Err(e) = self.posts.close().await {
            tracing::error!("Failed to close store: {}", e);
        }
    }
}
