//! Service layer for registration, login, and current-user resolution.

use crate::identity::{
    domain::{
        AccessToken, BearerCredential, DisplayName, EmailAddress, IdentityDomainError, Password,
        PasswordHash, User, UserId,
    },
    ports::{
        PasswordHasher, PasswordHasherError, TokenCodec, TokenError, UserRepository,
        UserRepositoryError,
    },
};
use mockable::Clock;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, info};

/// Plaintext hashed once to give unknown-email logins a hash to verify.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Request payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    name: Option<String>,
    password: Password,
}

impl RegisterUserRequest {
    /// Creates a request with the required credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            password: Password::candidate(password),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Request payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    email: String,
    password: Password,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Password::candidate(password),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The newly registered user.
    pub user: User,
    /// Bearer token for the new user's first session.
    pub token: AccessToken,
}

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum AuthSessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Password hashing failed.
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
    /// Token issuance failed.
    #[error(transparent)]
    Token(TokenError),
    /// The email is already registered.
    #[error("The user with this email already exists in the system")]
    EmailAlreadyRegistered(EmailAddress),
    /// The email and password do not match a registered user.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    /// The bearer credential is missing, invalid, or expired.
    #[error("Could not validate credentials")]
    Unauthenticated,
}

/// Result type for session service operations.
pub type AuthSessionResult<T> = Result<T, AuthSessionError>;

/// Registration and session orchestration service.
///
/// Password hashing and verification run on the blocking thread pool.
#[derive(Clone)]
pub struct AuthSessionService<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<C>,
    decoy_hash: Arc<OnceLock<PasswordHash>>,
}

impl<U, H, T, C> AuthSessionService<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
    C: Clock + Send + Sync,
{
    /// Creates a new session service.
    #[must_use]
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Registers a new user and issues their first bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthSessionError::Domain`] when a field fails validation and
    /// [`AuthSessionError::EmailAlreadyRegistered`] when the email is taken,
    /// including when a concurrent registration wins the race at commit.
    pub async fn register(&self, request: RegisterUserRequest) -> AuthSessionResult<Registration> {
        let RegisterUserRequest {
            email,
            name,
            password,
        } = request;

        let email_address = EmailAddress::new(email)?;
        let display_name = name.map(DisplayName::parse).transpose()?.flatten();
        let checked_password = Password::new(password.expose())?;

        if self.users.find_by_email(&email_address).await?.is_some() {
            return Err(AuthSessionError::EmailAlreadyRegistered(email_address));
        }

        let password_hash = self
            .with_hasher(move |hasher| hasher.hash(&checked_password))
            .await?;
        let user = User::register(email_address, display_name, password_hash, &*self.clock);
        self.users.store(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateEmail(taken) => {
                AuthSessionError::EmailAlreadyRegistered(taken)
            }
            other => AuthSessionError::Repository(other),
        })?;

        let token = self.issue_token(user.id())?;
        info!(user_id = %user.id(), "registered user");
        Ok(Registration { user, token })
    }

    /// Exchanges an email and password for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthSessionError::InvalidCredentials`] when the email is
    /// unknown or the password does not match. An unknown email still pays
    /// for one password verification, against a decoy hash.
    pub async fn login(&self, request: LoginRequest) -> AuthSessionResult<AccessToken> {
        let LoginRequest { email, password } = request;
        let Ok(email_address) = EmailAddress::new(email) else {
            self.verify_decoy(password).await?;
            return Err(AuthSessionError::InvalidCredentials);
        };
        let Some(user) = self.users.find_by_email(&email_address).await? else {
            self.verify_decoy(password).await?;
            debug!("login rejected: unknown email");
            return Err(AuthSessionError::InvalidCredentials);
        };
        let stored_hash = user.password_hash().clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(&password, &stored_hash))
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(AuthSessionError::InvalidCredentials);
        }

        let token = self.issue_token(user.id())?;
        info!(user_id = %user.id(), "issued access token");
        Ok(token)
    }

    /// Resolves the user behind a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthSessionError::Unauthenticated`] when the credential is
    /// absent, invalid, expired, or names a user that no longer exists.
    pub async fn current_user(
        &self,
        credential: Option<&BearerCredential>,
    ) -> AuthSessionResult<User> {
        let Some(presented) = credential else {
            return Err(AuthSessionError::Unauthenticated);
        };
        let user_id = self
            .tokens
            .verify(presented.token(), self.clock.utc())
            .map_err(|err| {
                debug!(error = %err, "bearer credential rejected");
                AuthSessionError::Unauthenticated
            })?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthSessionError::Unauthenticated)
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AuthSessionError::Repository`] when persistence lookup fails.
    pub async fn find_user(&self, id: UserId) -> AuthSessionResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    async fn with_hasher<F, R>(&self, work: F) -> AuthSessionResult<R>
    where
        F: FnOnce(&H) -> Result<R, PasswordHasherError> + Send + 'static,
        R: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || work(hasher.as_ref()))
            .await
            .map_err(PasswordHasherError::backend)?;
        Ok(outcome?)
    }

    /// Burns one verification so unknown emails cost as much as wrong
    /// passwords. The outcome is discarded.
    async fn verify_decoy(&self, password: Password) -> AuthSessionResult<()> {
        let decoy_hash = Arc::clone(&self.decoy_hash);
        self.with_hasher(move |hasher| {
            let hash = match decoy_hash.get() {
                Some(cached) => cached.clone(),
                None => {
                    let minted = hasher.hash(&Password::candidate(DECOY_PASSWORD))?;
                    decoy_hash.get_or_init(|| minted).clone()
                }
            };
            hasher.verify(&password, &hash)
        })
        .await?;
        Ok(())
    }

    fn issue_token(&self, user_id: UserId) -> AuthSessionResult<AccessToken> {
        self.tokens
            .issue(user_id, self.clock.utc())
            .map_err(AuthSessionError::Token)
    }
}
