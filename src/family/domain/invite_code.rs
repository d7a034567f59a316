//! Invite codes that admit users into a family.

use super::FamilyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-sensitive alphanumeric code identifying a family for joining.
///
/// Codes never expire and are not consumed by a join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Shortest code the generator may be configured to produce.
    pub const MIN_LEN: usize = 6;
    /// Longest code accepted anywhere.
    pub const MAX_LEN: usize = 32;
    /// Length produced by default.
    pub const DEFAULT_LEN: usize = 8;

    /// Parses a presented code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyDomainError::InvalidInviteCode`] when the code is
    /// blank, longer than 32 characters, or not ASCII alphanumeric.
    pub fn parse(value: impl Into<String>) -> Result<Self, FamilyDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed.len() <= Self::MAX_LEN
            && trimmed.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(FamilyDomainError::InvalidInviteCode(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InviteCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
