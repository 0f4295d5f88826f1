//! Store adapters and connection management.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

#[cfg(feature = "mongodb")]
pub mod mongo_repo;

pub use connections::{DatabaseConfig, StoreKind, connect_repository};
pub use memory::InMemoryTutorialRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresTutorialRepository;

#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoTutorialRepository;
