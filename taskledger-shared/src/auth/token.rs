/// Session token issuance and verification
///
/// Session tokens are signed JWTs (HS256, HMAC-SHA256) carrying the
/// authenticated identity. They are self-contained: every request is
/// authorized from the token signature alone, with no server-side session
/// state and no database round trip.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 1 hour by default, configurable per issuance
/// - **Validation**: signature first, then expiry, then issuer
/// - **Secret Management**: secrets should be at least 32 bytes (256 bits)
///
/// Signature failure and expiry are distinct error variants internally;
/// callers at the HTTP boundary collapse both into a single "invalid token"
/// response.
///
/// # Example
///
/// ```
/// use taskledger_shared::auth::token::{issue_token, verify_token, SessionClaims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let claims = SessionClaims::new(user_id, "alice".to_string(), Duration::hours(1));
/// let token = issue_token(&claims, secret)?;
///
/// let verified = verify_token(&token, secret)?;
/// assert_eq!(verified.sub, user_id);
/// assert_eq!(verified.username, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim, checked on every verification
const ISSUER: &str = "taskledger";

/// Default session lifetime in seconds (1 hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature, format, or issuer check failed
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Identity claims embedded in a session token
///
/// Not persisted anywhere: the token itself is the only copy, and its
/// lifetime is bounded by `exp`.
///
/// # Claims
///
/// - `sub`: Subject (user ID)
/// - `username`: Username at issuance time
/// - `iss`: Issuer (always "taskledger")
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Username (custom claim)
    pub username: String,

    /// Issuer - Always "taskledger"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims expiring `ttl` from now
    ///
    /// # Example
    ///
    /// ```
    /// use taskledger_shared::auth::token::SessionClaims;
    /// use chrono::Duration;
    /// use uuid::Uuid;
    ///
    /// let claims = SessionClaims::new(Uuid::new_v4(), "alice".to_string(), Duration::hours(1));
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(user_id: Uuid, username: String, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: user_id,
            username,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed session token from claims
///
/// # Arguments
///
/// * `claims` - Session claims
/// * `secret` - Secret key for signing (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails
pub fn issue_token(claims: &SessionClaims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a session token and extracts its claims
///
/// Verifies, in order:
/// - Signature is valid (any tampering is rejected)
/// - Token hasn't expired
/// - Issuer is "taskledger"
///
/// # Arguments
///
/// * `token` - Token string as presented by the client
/// * `secret` - Secret key used for signing
///
/// # Errors
///
/// Returns `TokenError::Expired` for an expired token with a valid
/// signature, `TokenError::Invalid` for any other failure.
pub fn verify_token(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
