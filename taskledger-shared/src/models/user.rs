/// User model
///
/// Identity record for a registered account. Usernames are unique and
/// case-sensitive; the database constraint is the authoritative enforcement
/// of that invariant. Accounts are created once at registration and never
/// mutated or deleted by this service.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User model representing a registered account
///
/// The password hash never leaves the service: API responses use
/// [`PublicUser`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4), assigned by the store
    pub id: Uuid,

    /// Username, unique and case-sensitive, immutable after creation
    pub username: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords, never serialize this to a client
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (uniqueness enforced by the store)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Client-safe projection of a user
///
/// What registration returns and what identity-bearing responses expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
