use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

#[cfg(feature = "mongodb")]
use blog_core::RepoError;

/// Default connection target of the document store.
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Default database holding the `posts` collection.
pub const DEFAULT_MONGODB_DATABASE: &str = "blog-api";

/// Configuration for the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_MONGODB_DATABASE.to_string(),
            max_pool_size: 10,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Open the connection pool and check that the server answers.
///
/// The driver connects lazily, so the `ping` is what surfaces an unreachable
/// server at startup rather than on the first request.
#[cfg(feature = "mongodb")]
pub async fn connect(config: &MongoConfig) -> Result<(Client, Database), RepoError> {
    tracing::info!(database = %config.database, "Connecting to document store...");

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.connect_timeout);
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
    let database = client.database(&config.database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    tracing::info!(
        "Document store connected (database: {}, pool: {})",
        config.database,
        config.max_pool_size
    );

    Ok((client, database))
}
