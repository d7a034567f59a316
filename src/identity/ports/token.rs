//! Bearer token encoding port.

use crate::identity::domain::{AccessToken, UserId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Issues and validates bearer tokens.
///
/// Tokens are self-contained: validation needs no server-side session
/// state, so discarding a token on the client is a complete logout.
pub trait TokenCodec: Send + Sync {
    /// Issues a token for `user_id` valid from `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when the token cannot be produced.
    fn issue(&self, user_id: UserId, issued_at: DateTime<Utc>)
    -> Result<AccessToken, TokenError>;

    /// Validates a token at time `now` and returns the subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for tampered or malformed tokens and
    /// [`TokenError::Expired`] once the token lifetime has elapsed.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError>;
}

/// Errors returned by token codec implementations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The token is malformed, tampered with, or signed by another key.
    #[error("invalid bearer token")]
    Invalid,

    /// The token lifetime has elapsed.
    #[error("bearer token expired")]
    Expired,

    /// The token could not be encoded.
    #[error("token encoding failed: {0}")]
    Encoding(Arc<dyn std::error::Error + Send + Sync>),
}

impl TokenError {
    /// Wraps an encoding error.
    pub fn encoding(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Encoding(Arc::new(err))
    }
}
