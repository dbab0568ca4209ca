/// Bearer-token authorization guard
///
/// This module authenticates protected requests from the `Authorization`
/// header alone. It extracts the bearer token, verifies it, and attaches the
/// resolved identity to the request as a typed [`AuthContext`] extension.
/// The guard performs no I/O: authorization is self-contained in the token
/// signature, keeping every request independently verifiable.
///
/// A missing header (or a header without the `Bearer` scheme) is reported as
/// [`AuthError::MissingToken`], distinct from a token that fails
/// verification ([`AuthError::InvalidToken`]).
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware, middleware::Next, routing::get, Extension, Router};
/// use taskledger_shared::auth::middleware::{require_bearer, AuthContext};
///
/// async fn protected(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected))
///     .layer(middleware::from_fn(|req: Request, next: Next| async move {
///         require_bearer("your-token-secret", req, next).await
///     }));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::{verify_token, SessionClaims};

/// Resolved identity attached to authenticated requests
///
/// Added to the request extensions after successful verification. Handlers
/// extract it with Axum's `Extension` extractor; it is the only channel
/// through which downstream code learns the caller's identity.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskledger_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("user {} ({})", auth.user_id, auth.username)
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Authenticated username
    pub username: String,
}

impl AuthContext {
    /// Creates an auth context from verified session claims
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// Error type for the authorization guard
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or no Bearer scheme in it
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed verification (tampered, expired, or malformed)
    #[error("Invalid token")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Missing bearer token").into_response()
            }
            AuthError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid token").into_response()
            }
        }
    }
}

/// Authenticates a raw `Authorization` header value
///
/// Expects the `Bearer <token>` scheme. Returns the resolved identity on
/// success. Expired and tampered tokens are distinguishable in logs but
/// both surface as [`AuthError::InvalidToken`].
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use taskledger_shared::auth::middleware::{authenticate, AuthError};
/// use taskledger_shared::auth::token::{issue_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = SessionClaims::new(Uuid::new_v4(), "alice".to_string(), Duration::hours(1));
/// let token = issue_token(&claims, secret)?;
///
/// let header = format!("Bearer {}", token);
/// let context = authenticate(Some(&header), secret)?;
/// assert_eq!(context.username, "alice");
///
/// assert!(matches!(authenticate(None, secret), Err(AuthError::MissingToken)));
/// # Ok(())
/// # }
/// ```
pub fn authenticate(header: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    // Absence of the Bearer scheme counts as a missing token, not a bad one
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    let claims = verify_token(token, secret).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AuthError::InvalidToken(e.to_string())
    })?;

    Ok(AuthContext::from_claims(claims))
}

/// Bearer-token middleware for protected routes
///
/// Validates the `Authorization: Bearer <token>` header and injects
/// [`AuthContext`] into the request extensions before calling the inner
/// handler.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header or scheme is missing, or if the
/// token fails verification (including expiry).
pub async fn require_bearer(
    secret: &str,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let context = authenticate(header, secret)?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
