//! # Tutorial Shared
//!
//! Wire types exchanged with API clients.
//! In a full-stack Rust setup, this crate is compiled for both server and WASM.

pub mod dto;
pub mod response;

pub use dto::{CreateTutorialRequest, TutorialListQuery, TutorialResponse, UpdateTutorialRequest};
pub use response::MessageResponse;
