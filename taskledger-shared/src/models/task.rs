/// Task model
///
/// A task is an owned resource: it is visible, mutable, and deletable only
/// through requests authenticated as its owner. Ownership is fixed at
/// creation and never transferred.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     is_complete BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task model representing an owned to-do item
///
/// Serialized in camelCase on the wire (`isComplete`, `ownerId`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID, assigned by the store
    pub id: Uuid,

    /// Owning user, immutable after creation
    pub owner_id: Uuid,

    /// Title, required and non-empty
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag, defaults to false
    pub is_complete: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// New tasks always start incomplete.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Title, required and non-empty
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for a full-replace task update
///
/// Updates replace title, description, and completion state in one
/// operation; there is no partial patch.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New title, required and non-empty
    pub title: String,

    /// New description (None clears it)
    pub description: Option<String>,

    /// New completion state
    pub is_complete: bool,
}
