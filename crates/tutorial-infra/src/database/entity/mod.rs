//! SeaORM entities.

pub mod tutorial;
