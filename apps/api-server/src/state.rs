//! Application state - shared across all handlers.

use std::sync::Arc;

use tutorial_core::ports::TutorialRepository;
use tutorial_infra::database::{DatabaseConfig, InMemoryTutorialRepository, connect_repository};

/// Shared application state.
///
/// Holds the single long-lived store handle; workers clone the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tutorials: Arc<dyn TutorialRepository>,
}

impl AppState {
    /// Build the application state, connecting to the configured store.
    ///
    /// A store that cannot be reached at startup is replaced by the
    /// in-memory store so the server still comes up.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        if db_config.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        let tutorials = match connect_repository(db_config).await {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryTutorialRepository::new())
            }
        };

        tracing::info!(store = tutorials.backend(), "Application state initialized");

        Self { tutorials }
    }

    /// Build the state around an existing repository.
    pub fn with_repository(tutorials: Arc<dyn TutorialRepository>) -> Self {
        Self { tutorials }
    }
}
