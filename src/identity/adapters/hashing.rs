//! Argon2id password hashing adapter.

use crate::identity::{
    domain::{Password, PasswordHash},
    ports::{PasswordHasher, PasswordHasherError},
};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
};
use rand::RngCore;

const SALT_LEN: usize = 16;

/// Argon2id hasher producing PHC-format strings.
///
/// Verification reads the cost parameters from the stored hash, so hashes
/// created under older settings keep verifying after a cost change.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with explicit memory (KiB) and iteration costs.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Backend`] when the costs are outside
    /// the ranges Argon2 accepts.
    pub fn with_costs(memory_kib: u32, iterations: u32) -> Result<Self, PasswordHasherError> {
        let params =
            Params::new(memory_kib, iterations, 1, None).map_err(PasswordHasherError::backend)?;
        Ok(Self { params })
    }

    fn engine(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes).map_err(PasswordHasherError::backend)?;

        let encoded = self
            .engine()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(PasswordHasherError::backend)?
            .to_string();
        PasswordHash::new(encoded).map_err(PasswordHasherError::backend)
    }

    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let parsed = EncodedHash::new(hash.as_str())
            .map_err(|err| PasswordHasherError::MalformedHash(err.to_string()))?;
        Ok(self
            .engine()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok())
    }
}
