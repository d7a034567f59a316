//! Runtime configuration read from the environment.
//!
//! All settings are optional except the token secret. Values are parsed
//! eagerly so a misconfigured deployment fails at start-up rather than on
//! the first request.

use crate::family::domain::InviteCode;
use chrono::Duration;
use std::env;
use std::fmt;
use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const SECRET_KEY_VAR: &str = "HOMELIST_SECRET_KEY";
/// Environment variable holding the token lifetime in minutes.
pub const TOKEN_LIFETIME_VAR: &str = "HOMELIST_ACCESS_TOKEN_EXPIRE_MINUTES";
/// Environment variable holding the invite code length.
pub const INVITE_CODE_LENGTH_VAR: &str = "HOMELIST_INVITE_CODE_LENGTH";
/// Environment variable holding the Argon2 memory cost in KiB.
pub const HASH_MEMORY_VAR: &str = "HOMELIST_PASSWORD_HASH_MEMORY_KIB";
/// Environment variable holding the Argon2 iteration count.
pub const HASH_ITERATIONS_VAR: &str = "HOMELIST_PASSWORD_HASH_ITERATIONS";
/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Shortest accepted token secret, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;
/// Default token lifetime: eight days.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 60 * 24 * 8;
/// Default Argon2 memory cost.
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
/// Default Argon2 iteration count.
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A variable is set to an unusable value.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value, redacted for secrets.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Household engine settings.
#[derive(Clone, PartialEq, Eq)]
pub struct HouseholdConfig {
    secret_key: Vec<u8>,
    token_lifetime: Duration,
    invite_code_length: usize,
    hash_memory_kib: u32,
    hash_iterations: u32,
    database_url: Option<String>,
}

impl HouseholdConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or any value
    /// fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_KEY_VAR)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(SECRET_KEY_VAR))?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Invalid {
                key: SECRET_KEY_VAR,
                value: "<redacted>".to_owned(),
                reason: format!("must be at least {MIN_SECRET_BYTES} bytes"),
            });
        }

        let lifetime_minutes =
            parse_or(&lookup, TOKEN_LIFETIME_VAR, DEFAULT_TOKEN_LIFETIME_MINUTES)?;
        let token_lifetime = (lifetime_minutes > 0)
            .then(|| Duration::try_minutes(lifetime_minutes))
            .flatten()
            .ok_or_else(|| ConfigError::Invalid {
                key: TOKEN_LIFETIME_VAR,
                value: lifetime_minutes.to_string(),
                reason: "must be a positive number of minutes".to_owned(),
            })?;

        let invite_code_length = parse_or(&lookup, INVITE_CODE_LENGTH_VAR, InviteCode::DEFAULT_LEN)?;
        if !(InviteCode::MIN_LEN..=InviteCode::MAX_LEN).contains(&invite_code_length) {
            return Err(ConfigError::Invalid {
                key: INVITE_CODE_LENGTH_VAR,
                value: invite_code_length.to_string(),
                reason: format!(
                    "must be between {} and {}",
                    InviteCode::MIN_LEN,
                    InviteCode::MAX_LEN
                ),
            });
        }

        Ok(Self {
            secret_key: secret.into_bytes(),
            token_lifetime,
            invite_code_length,
            hash_memory_kib: parse_or(&lookup, HASH_MEMORY_VAR, DEFAULT_HASH_MEMORY_KIB)?,
            hash_iterations: parse_or(&lookup, HASH_ITERATIONS_VAR, DEFAULT_HASH_ITERATIONS)?,
            database_url: lookup(DATABASE_URL_VAR).filter(|value| !value.is_empty()),
        })
    }

    /// Returns the token signing secret.
    #[must_use]
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// Returns the bearer token lifetime.
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Returns the invite code length.
    #[must_use]
    pub const fn invite_code_length(&self) -> usize {
        self.invite_code_length
    }

    /// Returns the Argon2 memory cost in KiB.
    #[must_use]
    pub const fn hash_memory_kib(&self) -> u32 {
        self.hash_memory_kib
    }

    /// Returns the Argon2 iteration count.
    #[must_use]
    pub const fn hash_iterations(&self) -> u32 {
        self.hash_iterations
    }

    /// Returns the `PostgreSQL` URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

impl fmt::Debug for HouseholdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HouseholdConfig")
            .field("secret_key", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .field("invite_code_length", &self.invite_code_length)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value: raw,
        }),
    }
}
