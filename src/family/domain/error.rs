//! Error types for family domain validation.

use thiserror::Error;

/// Errors returned while constructing family domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FamilyDomainError {
    /// The family name is empty after trimming.
    #[error("family name must not be empty")]
    EmptyFamilyName,

    /// The family name exceeds the 255-character storage limit.
    #[error("family name exceeds 255 character limit")]
    FamilyNameTooLong,

    /// The invite code is blank, too long, or contains non-alphanumeric
    /// characters.
    #[error("invalid invite code '{0}'")]
    InvalidInviteCode(String),

    /// The requested invite code length is outside the supported range.
    #[error("invite code length {0} is outside the supported range {min}..={max}", min = super::InviteCode::MIN_LEN, max = super::InviteCode::MAX_LEN)]
    UnsupportedInviteCodeLength(usize),
}
