//! The `{ "message": ... }` envelope used for errors and confirmations.

use serde::{Deserialize, Serialize};

/// Message-only response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn updated() -> Self {
        Self::new("tutorial was updated successfully.")
    }

    pub fn deleted() -> Self {
        Self::new("Tutorial was deleted successfully!")
    }

    pub fn deleted_all(count: u64) -> Self {
        Self::new(format!("{count} Tutorials were deleted successfully!"))
    }
}
