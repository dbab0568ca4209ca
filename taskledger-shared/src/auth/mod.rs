/// Authentication and authorization utilities
///
/// This module provides the secure authentication primitives for taskledger:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and fails-closed verification
/// - [`token`]: signed session tokens (HS256) with bounded lifetimes
/// - [`middleware`]: bearer-token guard attaching a typed identity to requests
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256 signing, 1-hour default expiry, no server state
/// - **Constant-time Comparison**: password verification never leaks timing
///   correlated with hash content
///
/// # Example
///
/// ```
/// use taskledger_shared::auth::password::{hash_password, verify_password};
/// use taskledger_shared::auth::token::{issue_token, verify_token, SessionClaims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash));
///
/// // Session token issuance
/// let claims = SessionClaims::new(Uuid::new_v4(), "alice".to_string(), Duration::hours(1));
/// let token = issue_token(&claims, "test-secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod password;
pub mod token;
