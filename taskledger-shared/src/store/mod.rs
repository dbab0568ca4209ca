/// Persistence abstraction for taskledger
///
/// The store is the only shared mutable resource in the system. This module
/// defines the contract the service layer depends on; concrete backends are
/// constructed explicitly at startup and injected, so tests can substitute
/// the in-memory implementation without touching a database.
///
/// # Store Contract
///
/// All implementations must:
/// 1. Enforce username uniqueness at insert time (the pre-check in the
///    service layer is advisory only; the store constraint is authoritative)
/// 2. Make task mutations conditional on `(id, owner_id)` in one atomic
///    operation, reporting "no rows matched" rather than distinguishing
///    a missing task from a task owned by someone else
/// 3. Surface backend failures as [`StoreError::Unavailable`] without
///    leaking constraint names or SQL text to callers above the service
///
/// # Modules
///
/// - [`postgres`]: sqlx/PostgreSQL implementations used in production
/// - [`memory`]: in-memory implementations for tests

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write would break a uniqueness invariant
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The backend failed (connectivity, timeout, protocol error)
    ///
    /// Never retried by this service; surfaced as a generic server error.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable table of users keyed by unique username
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a new user, assigning its ID
    ///
    /// Fails with [`StoreError::UniqueViolation`] if the username is already
    /// taken, including when a concurrent registration raced past an earlier
    /// lookup.
    async fn insert_user(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Finds a user by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Checks backend connectivity
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Durable table of tasks, each owned by exactly one user
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task owned by `owner_id`, assigning its ID
    async fn insert_task(&self, owner_id: Uuid, data: CreateTask) -> Result<Task, StoreError>;

    /// Lists all tasks owned by `owner_id`, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Replaces a task's title, description, and completion state
    ///
    /// The update matches both `task_id` and `owner_id` in a single atomic
    /// operation. Returns `None` when no row matched, whether the task does
    /// not exist or belongs to another owner.
    async fn update_owned(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes a task matching both `task_id` and `owner_id`
    ///
    /// Returns `false` when no row matched, with the same collapsing as
    /// [`TaskStore::update_owned`].
    async fn delete_owned(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, StoreError>;
}
