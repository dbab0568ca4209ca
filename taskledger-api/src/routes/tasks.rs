/// Task endpoints
///
/// Every handler here runs behind the bearer-token guard; the caller's
/// identity arrives as an [`AuthContext`] extension and scopes every store
/// operation. A task owned by another user is indistinguishable from a
/// missing one (404 in both cases).
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Replace title, description, and completion state
/// - `DELETE /tasks/:id` - Delete a task

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use taskledger_shared::auth::middleware::AuthContext;
use taskledger_shared::models::task::Task;

use crate::{app::AppState, error::ApiResult};

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title, required and non-empty
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Update task request (full replace)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title, required and non-empty
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// New description (omitting it clears the field)
    pub description: Option<String>,

    /// New completion state
    pub is_complete: bool,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Lists the caller's tasks
///
/// Returns only tasks owned by the authenticated user, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_service().list(auth.user_id).await?;

    Ok(Json(tasks))
}

/// Creates a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
///
/// {"title": "buy milk", "description": "2 liters"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty title
/// - `401 Unauthorized`: missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = state
        .task_service()
        .create(auth.user_id, &req.title, req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Replaces a task's title, description, and completion state
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Authorization: Bearer <token>
///
/// {"title": "buy milk", "isComplete": true}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty title
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = state
        .task_service()
        .update(auth.user_id, id, &req.title, req.description, req.is_complete)
        .await?;

    Ok(Json(task))
}

/// Deletes a task owned by the caller
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    state.task_service().delete(auth.user_id, id).await?;

    Ok(Json(DeleteResponse {
        message: "Task deleted".to_string(),
    }))
}
