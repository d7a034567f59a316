//! Domain model for user identity and sessions.
//!
//! Users are identified by a case-insensitive email address and
//! authenticate with a password. Successful authentication yields an opaque
//! bearer token that callers attach to every later operation.

mod email;
mod error;
mod ids;
mod password;
mod token;
mod user;

pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use ids::{DisplayName, UserId};
pub use password::{Password, PasswordHash};
pub use token::{AccessToken, BearerCredential};
pub use user::{PersistedUserData, User};
