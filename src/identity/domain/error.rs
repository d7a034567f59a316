//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the 255-character storage limit.
    #[error("email address exceeds 255 character limit")]
    EmailTooLong,

    /// The display name exceeds the 255-character storage limit.
    #[error("display name exceeds 255 character limit")]
    DisplayNameTooLong,

    /// The password length falls outside the accepted bounds.
    #[error("password must be between {min} and {max} characters")]
    InvalidPasswordLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The stored password hash is empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}
