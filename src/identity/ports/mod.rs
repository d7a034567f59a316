//! Port contracts for user identity.
//!
//! Ports define infrastructure-agnostic interfaces used by the session
//! service: user persistence, password hashing, and token encoding.

pub mod hasher;
pub mod repository;
pub mod token;

pub use hasher::{PasswordHasher, PasswordHasherError};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use token::{TokenCodec, TokenError};

#[cfg(test)]
pub use hasher::MockPasswordHasher;
