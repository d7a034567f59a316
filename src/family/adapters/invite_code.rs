//! Random invite code generator.

use crate::family::{
    domain::{FamilyDomainError, InviteCode},
    ports::InviteCodeGenerator,
};
use rand::{Rng, distributions::Alphanumeric};

/// Generates alphanumeric invite codes from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomInviteCodeGenerator {
    length: usize,
}

impl RandomInviteCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyDomainError::UnsupportedInviteCodeLength`] when
    /// `length` is outside `6..=32`.
    pub const fn new(length: usize) -> Result<Self, FamilyDomainError> {
        if length < InviteCode::MIN_LEN || length > InviteCode::MAX_LEN {
            return Err(FamilyDomainError::UnsupportedInviteCodeLength(length));
        }
        Ok(Self { length })
    }

    /// Returns the configured code length.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomInviteCodeGenerator {
    fn default() -> Self {
        Self {
            length: InviteCode::DEFAULT_LEN,
        }
    }
}

impl InviteCodeGenerator for RandomInviteCodeGenerator {
    fn generate(&self) -> Result<InviteCode, FamilyDomainError> {
        let candidate: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        InviteCode::parse(candidate)
    }
}
