//! # Tutorial Core
//!
//! The domain layer of the tutorial service.
//! This crate contains the tutorial record, its store port and error types,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
