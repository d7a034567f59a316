//! Password hashing port.

use crate::identity::domain::{Password, PasswordHash};
use std::sync::Arc;
use thiserror::Error;

/// One-way password hashing contract.
///
/// Implementations may block; callers run them off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError`] when the hashing backend fails.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError`] when the stored hash cannot be parsed.
    fn verify(&self, password: &Password, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}

/// Errors returned by password hasher implementations.
#[derive(Debug, Clone, Error)]
pub enum PasswordHasherError {
    /// The stored hash is not a valid encoded hash.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    /// The hashing backend failed.
    #[error("password hashing failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PasswordHasherError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
