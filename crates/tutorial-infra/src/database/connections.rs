use std::sync::Arc;

#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database};

use tutorial_core::error::RepoError;
use tutorial_core::ports::TutorialRepository;

use super::memory::InMemoryTutorialRepository;

/// Configuration for the tutorial store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Database name inside the deployment (document store only).
    pub database_name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Which store backs the tutorial repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
    MongoDb,
}

impl StoreKind {
    /// Pick the backend from the connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, RepoError> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);

        match scheme {
            Some("mongodb" | "mongodb+srv") => Ok(Self::MongoDb),
            Some("postgres" | "postgresql") => Ok(Self::Postgres),
            Some("memory") => Ok(Self::Memory),
            _ => Err(RepoError::Connection(format!(
                "unsupported database url scheme in '{}'",
                redact(url)
            ))),
        }
    }
}

/// Strip credentials from a connection URL for logging.
fn redact(url: &str) -> String {
    match (url.split_once("://"), url.rfind('@')) {
        (Some((scheme, _)), Some(at)) => format!("{}://***{}", scheme, &url[at..]),
        _ => url.to_string(),
    }
}

/// Build the tutorial repository for `config`.
///
/// Without a configuration the in-memory store is used.
pub async fn connect_repository(
    config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn TutorialRepository>, RepoError> {
    let Some(config) = config else {
        return Ok(Arc::new(InMemoryTutorialRepository::new()));
    };

    tracing::info!(url = %redact(&config.url), "Initializing tutorial store...");

    match StoreKind::from_url(&config.url)? {
        StoreKind::Memory => Ok(Arc::new(InMemoryTutorialRepository::new())),
        StoreKind::Postgres => connect_postgres(config).await,
        StoreKind::MongoDb => connect_mongodb(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(
    config: &DatabaseConfig,
) -> Result<Arc<dyn TutorialRepository>, RepoError> {
    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;
    tracing::info!(
        "PostgreSQL connected (pool: {})",
        config.max_connections
    );

    Ok(Arc::new(super::PostgresTutorialRepository::new(db)))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(
    _config: &DatabaseConfig,
) -> Result<Arc<dyn TutorialRepository>, RepoError> {
    Err(RepoError::Connection(
        "built without the postgres feature".to_string(),
    ))
}

#[cfg(feature = "mongodb")]
async fn connect_mongodb(
    config: &DatabaseConfig,
) -> Result<Arc<dyn TutorialRepository>, RepoError> {
    let repo = super::MongoTutorialRepository::connect(config).await?;
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_mongodb(
    _config: &DatabaseConfig,
) -> Result<Arc<dyn TutorialRepository>, RepoError> {
    Err(RepoError::Connection(
        "built without the mongodb feature".to_string(),
    ))
}
