/// Task service
///
/// Owner-scoped CRUD over an injected [`TaskStore`]. Every operation takes
/// the caller's resolved identity; a task that exists but belongs to a
/// different owner responds identically to one that does not exist
/// ([`TaskServiceError::NotFound`]), so ownership is never disclosed as a
/// distinct failure.
///
/// The store's conditional mutations (matching id and owner in one
/// statement) are the authoritative success signal; there is no separate
/// existence check that could race with a concurrent delete.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskledger_shared::service::tasks::TaskService;
/// use taskledger_shared::store::memory::InMemoryTaskStore;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = TaskService::new(Arc::new(InMemoryTaskStore::new()));
/// let owner = Uuid::new_v4();
///
/// let task = service.create(owner, "buy milk", None).await?;
/// assert!(!task.is_complete);
/// assert_eq!(service.list(owner).await?.len(), 1);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use uuid::Uuid;

use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::store::{StoreError, TaskStore};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Malformed input (empty title)
    #[error("{0}")]
    Validation(String),

    /// Task absent, or owned by someone else; deliberately indistinguishable
    #[error("Task not found")]
    NotFound,

    /// The store call failed
    #[error("Store unavailable: {0}")]
    Store(String),
}

impl From<StoreError> for TaskServiceError {
    fn from(err: StoreError) -> Self {
        TaskServiceError::Store(err.to_string())
    }
}

/// Task service over an injected task store
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    /// Creates the service with its store dependency
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's tasks, newest first
    ///
    /// Returns exactly the tasks owned by `owner_id` and nothing else;
    /// repeatable without side effects.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.store.list_by_owner(owner_id).await?)
    }

    /// Creates a task owned by the caller
    ///
    /// New tasks start incomplete.
    ///
    /// # Errors
    ///
    /// [`TaskServiceError::Validation`] if the title is empty
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        description: Option<String>,
    ) -> Result<Task, TaskServiceError> {
        if title.is_empty() {
            return Err(TaskServiceError::Validation(
                "Title must not be empty".to_string(),
            ));
        }

        let task = self
            .store
            .insert_task(
                owner_id,
                CreateTask {
                    title: title.to_string(),
                    description,
                },
            )
            .await?;

        tracing::debug!(task_id = %task.id, owner_id = %owner_id, "Created task");

        Ok(task)
    }

    /// Replaces a task's title, description, and completion state
    ///
    /// # Errors
    ///
    /// - [`TaskServiceError::Validation`] if the new title is empty
    /// - [`TaskServiceError::NotFound`] if no task matches both the id and
    ///   the caller's ownership
    pub async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        title: &str,
        description: Option<String>,
        is_complete: bool,
    ) -> Result<Task, TaskServiceError> {
        if title.is_empty() {
            return Err(TaskServiceError::Validation(
                "Title must not be empty".to_string(),
            ));
        }

        let changes = UpdateTask {
            title: title.to_string(),
            description,
            is_complete,
        };

        self.store
            .update_owned(owner_id, task_id, changes)
            .await?
            .ok_or(TaskServiceError::NotFound)
    }

    /// Deletes a task owned by the caller
    ///
    /// # Errors
    ///
    /// [`TaskServiceError::NotFound`] if no task matches both the id and the
    /// caller's ownership, including a task deleted concurrently after any
    /// earlier check.
    pub async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<(), TaskServiceError> {
        let deleted = self.store.delete_owned(owner_id, task_id).await?;

        if !deleted {
            return Err(TaskServiceError::NotFound);
        }

        tracing::debug!(task_id = %task_id, owner_id = %owner_id, "Deleted task");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryTaskStore;

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskStore::new()))
    }

    #[tokio::test]
    async fn test_create_starts_incomplete() {
        let service = service();
        let owner = Uuid::new_v4();

        let task = service
            .create(owner, "buy milk", Some("2 liters".to_string()))
            .await
            .unwrap();

        assert_eq!(task.title, "buy milk");
        assert_eq!(task.description.as_deref(), Some("2 liters"));
        assert!(!task.is_complete);
        assert_eq!(task.owner_id, owner);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let service = service();

        let result = service.create(Uuid::new_v4(), "", None).await;
        assert!(matches!(result, Err(TaskServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let service = service();
        let owner = Uuid::new_v4();

        let task = service
            .create(owner, "buy milk", Some("2 liters".to_string()))
            .await
            .unwrap();

        let updated = service
            .update(owner, task.id, "buy oat milk", None, true)
            .await
            .unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "buy oat milk");
        assert!(updated.description.is_none());
        assert!(updated.is_complete);
    }

    #[tokio::test]
    async fn test_update_unknown_id_not_found() {
        let service = service();

        let result = service
            .update(Uuid::new_v4(), Uuid::new_v4(), "title", None, false)
            .await;

        assert!(matches!(result, Err(TaskServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_ownership_isolation_on_update_and_delete() {
        let service = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let task = service.create(alice, "alice task", None).await.unwrap();

        // Bob's update of Alice's task and of a nonexistent id are the same error
        let foreign = service
            .update(bob, task.id, "hijacked", None, true)
            .await
            .unwrap_err();
        let missing = service
            .update(bob, Uuid::new_v4(), "hijacked", None, true)
            .await
            .unwrap_err();

        assert!(matches!(foreign, TaskServiceError::NotFound));
        assert!(matches!(missing, TaskServiceError::NotFound));
        assert_eq!(foreign.to_string(), missing.to_string());

        // Same collapsing for delete
        assert!(matches!(
            service.delete(bob, task.id).await,
            Err(TaskServiceError::NotFound)
        ));

        // Alice still sees her task unchanged
        let listed = service.list(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "alice task");
    }

    #[tokio::test]
    async fn test_delete_then_update_not_found() {
        let service = service();
        let owner = Uuid::new_v4();

        let task = service.create(owner, "buy milk", None).await.unwrap();
        service.delete(owner, task.id).await.unwrap();

        assert!(matches!(
            service.delete(owner, task.id).await,
            Err(TaskServiceError::NotFound)
        ));
        assert!(matches!(
            service.update(owner, task.id, "buy milk", None, true).await,
            Err(TaskServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_repeatable() {
        let service = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.create(alice, "a1", None).await.unwrap();
        service.create(alice, "a2", None).await.unwrap();
        service.create(bob, "b1", None).await.unwrap();

        let first = service.list(alice).await.unwrap();
        let second = service.list(alice).await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|t| t.owner_id == alice));
        assert_eq!(
            first.iter().map(|t| t.id).collect::<Vec<_>>(),
            second.iter().map(|t| t.id).collect::<Vec<_>>()
        );
    }
}
