//! Plaintext passwords and their stored hashes.

use super::IdentityDomainError;
use std::fmt;

/// Plaintext password accepted at registration or login.
///
/// The value is never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Minimum accepted password length in characters.
    pub const MIN_CHARS: usize = 4;
    /// Maximum accepted password length in characters.
    pub const MAX_CHARS: usize = 40;

    /// Creates a password that satisfies the registration length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidPasswordLength`] when the value
    /// is shorter than 4 or longer than 40 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&length) {
            return Err(IdentityDomainError::InvalidPasswordLength {
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(raw))
    }

    /// Wraps a login attempt without applying registration bounds.
    ///
    /// Login compares against the stored hash, so any input is acceptable.
    #[must_use]
    pub fn candidate(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the plaintext for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded hash.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPasswordHash`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(IdentityDomainError::EmptyPasswordHash);
        }
        Ok(Self(raw))
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
