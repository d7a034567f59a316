//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing list and task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The list name is empty after trimming.
    #[error("list name must not be empty")]
    EmptyListName,

    /// The list name exceeds 255 characters.
    #[error("list name exceeds 255 character limit")]
    ListNameTooLong,

    /// The colour is not a six-digit hex triplet.
    #[error("invalid list colour '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds 255 characters.
    #[error("task title exceeds 255 character limit")]
    TaskTitleTooLong,
}
