/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Authenticate and receive a session token

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{app::AppState, error::ApiResult};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username (unique, case-sensitive)
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password (stored only as a salted hash)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register response
///
/// The password hash is never part of any response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token, valid for the configured lifetime (1h default)
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {"username": "alice", "password": "pw1"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty field, or username already taken
/// - `500 Internal Server Error`: store failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let user = state
        .auth_service()
        .register(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Login endpoint
///
/// Verifies credentials and issues a signed session token. An unknown
/// username and a wrong password produce the same response, so accounts
/// cannot be enumerated.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {"username": "alice", "password": "pw1"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid credentials
/// - `500 Internal Server Error`: store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state
        .auth_service()
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}
