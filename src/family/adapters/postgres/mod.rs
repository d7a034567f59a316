//! `PostgreSQL` adapters for family persistence.

mod models;
mod repository;
mod schema;

pub use repository::{FamilyPgPool, PostgresFamilyRepository};
