//! Bearer tokens issued at login.

use std::fmt;

/// Opaque bearer token issued by a successful login or registration.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps an encoded token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the token into the credential a client attaches to requests.
    #[must_use]
    pub fn into_credential(self) -> BearerCredential {
        BearerCredential(self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Credential presented by a caller on an authenticated request.
///
/// Sessions hold this value explicitly; logging out means discarding it.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    /// Wraps a raw credential, stripping an optional `Bearer ` prefix.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let token = raw
            .trim()
            .strip_prefix("Bearer ")
            .map_or_else(|| raw.trim().to_owned(), |rest| rest.trim().to_owned());
        Self(token)
    }

    /// Returns the token text.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(<redacted>)")
    }
}
