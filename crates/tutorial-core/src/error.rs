//! Domain-level error types.

use thiserror::Error;

/// Domain errors - request payloads that can never reach the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tutorial title is required")]
    MissingTitle,

    #[error("No tutorial fields to update")]
    EmptyChanges,
}

/// Repository-level errors.
///
/// A lookup that matches nothing is not an error: repositories report it as
/// `Ok(None)` / `Ok(false)`.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Query(String),

    #[error("Invalid tutorial id: {0}")]
    InvalidId(String),

    #[error("Document conversion failed: {0}")]
    Serialization(String),
}

impl RepoError {
    /// The underlying store message, if the store supplied one.
    pub fn message(&self) -> Option<String> {
        let inner = match self {
            RepoError::Connection(msg)
            | RepoError::Query(msg)
            | RepoError::Serialization(msg) => msg,
            RepoError::InvalidId(_) => return Some(self.to_string()),
        };

        if inner.trim().is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}
