/// Authentication service
///
/// Orchestrates registration (uniqueness check, hash, persist) and login
/// (lookup, hash verify, token issue) over an injected [`CredentialStore`].
///
/// Unknown usernames and wrong passwords fail with the same
/// [`AuthServiceError::InvalidCredentials`] value, so callers cannot probe
/// which usernames exist. The registration pre-check is advisory: the
/// store's uniqueness constraint is authoritative, and an insert that loses
/// a race still reports [`AuthServiceError::DuplicateUsername`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::Duration;
/// use taskledger_shared::service::auth::AuthService;
/// use taskledger_shared::store::memory::InMemoryCredentialStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = AuthService::new(
///     Arc::new(InMemoryCredentialStore::new()),
///     "test-secret-key-at-least-32-bytes-long",
///     Duration::hours(1),
/// );
///
/// let user = service.register("alice", "pw1").await?;
/// let token = service.login("alice", "pw1").await?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{
    password::{hash_password, verify_password, PasswordError},
    token::{issue_token, SessionClaims, TokenError},
};
use crate::models::user::{CreateUser, PublicUser};
use crate::store::{CredentialStore, StoreError};

/// Error type for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Malformed input (empty required field)
    #[error("{0}")]
    Validation(String),

    /// Username already registered
    #[error("Username already taken")]
    DuplicateUsername,

    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token issuance failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The store call failed
    #[error("Store unavailable: {0}")]
    Store(String),
}

impl From<StoreError> for AuthServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // The insert-time constraint is the authoritative duplicate check
            StoreError::UniqueViolation(_) => AuthServiceError::DuplicateUsername,
            StoreError::Unavailable(msg) => AuthServiceError::Store(msg),
        }
    }
}

/// Authentication service over an injected credential store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    token_secret: Arc<str>,
    token_ttl: Duration,
}

impl AuthService {
    /// Creates the service with its dependencies
    ///
    /// # Arguments
    ///
    /// * `store` - Credential backend (Postgres in production, in-memory in tests)
    /// * `token_secret` - Server-held signing secret, never logged
    /// * `token_ttl` - Session lifetime (1 hour per the default config)
    pub fn new(
        store: Arc<dyn CredentialStore>,
        token_secret: impl Into<Arc<str>>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            token_secret: token_secret.into(),
            token_ttl,
        }
    }

    /// Registers a new user
    ///
    /// Rejects empty usernames and passwords, hashes the password, and
    /// persists the account. Returns the created user without its hash.
    ///
    /// # Errors
    ///
    /// - [`AuthServiceError::Validation`] for empty required fields
    /// - [`AuthServiceError::DuplicateUsername`] if the username is taken,
    ///   whether detected by the advisory lookup or by the insert itself
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PublicUser, AuthServiceError> {
        if username.is_empty() {
            return Err(AuthServiceError::Validation(
                "Username must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthServiceError::Validation(
                "Password must not be empty".to_string(),
            ));
        }

        // Advisory pre-check; a concurrent registration can still race past
        // it, in which case the insert below reports the duplicate.
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AuthServiceError::DuplicateUsername);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .store
            .insert_user(CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered new user");

        Ok(PublicUser::from(&user))
    }

    /// Authenticates a user and issues a session token
    ///
    /// # Errors
    ///
    /// [`AuthServiceError::InvalidCredentials`] for an unknown username or a
    /// wrong password; the two cases are not distinguishable by the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthServiceError> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let claims = SessionClaims::new(user.id, user.username, self.token_ttl);
        let token = issue_token(&claims, &self.token_secret)?;

        tracing::debug!(user_id = %user.id, "Issued session token");

        Ok(token)
    }
}
