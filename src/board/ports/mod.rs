//! Port contracts for list and task persistence.

pub mod repository;

pub use repository::{BoardRepositoryError, BoardRepositoryResult, ListRepository, TaskRepository};
