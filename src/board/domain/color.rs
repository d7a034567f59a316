//! List colour values.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Six-digit hex colour, stored as `#RRGGBB` in upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListColor(String);

impl ListColor {
    /// Parses a colour, accepting an optional leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColor`] unless the value holds
    /// exactly six hex digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(BoardDomainError::InvalidColor(raw));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Returns the colour as `#RRGGBB`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
