//! # Tutorial Infrastructure
//!
//! Concrete implementations of the `TutorialRepository` port defined in
//! `tutorial-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All store backends enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `mongodb` - MongoDB document store

pub mod database;

pub use database::{DatabaseConfig, InMemoryTutorialRepository, StoreKind, connect_repository};

#[cfg(feature = "postgres")]
pub use database::PostgresTutorialRepository;

#[cfg(feature = "mongodb")]
pub use database::MongoTutorialRepository;
