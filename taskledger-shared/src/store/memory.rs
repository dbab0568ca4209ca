/// In-memory store implementations for tests
///
/// Deterministic fakes for [`CredentialStore`] and [`TaskStore`] backed by
/// maps behind a single mutex per store. Each operation holds the lock for
/// its whole duration, so the same atomicity the database constraints give
/// production code holds here: concurrent registrations of one username
/// resolve to exactly one winner, and ownership-scoped mutations are
/// check-and-write in one step.
///
/// # Example
///
/// ```
/// use taskledger_shared::models::user::CreateUser;
/// use taskledger_shared::store::{memory::InMemoryCredentialStore, CredentialStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryCredentialStore::new();
///
/// let user = store
///     .insert_user(CreateUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
///
/// assert!(store.find_by_username("alice").await?.is_some());
/// assert_eq!(store.find_by_username("alice").await?.unwrap().id, user.id);
/// # Ok(())
/// # }
/// ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

use super::{CredentialStore, StoreError, TaskStore};

/// In-memory credential store
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        // Check and insert under one lock, like the database constraint
        if users.values().any(|u| u.username == data.username) {
            return Err(StoreError::UniqueViolation("users_username_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory task store
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_task(&self, owner_id: Uuid, data: CreateTask) -> Result<Task, StoreError> {
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            owner_id,
            title: data.title,
            description: data.description,
            is_complete: false,
            created_at: now,
            updated_at: now,
        };
        tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .tasks
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned)
    }

    async fn update_owned(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        match tasks.get_mut(&task_id) {
            Some(task) if task.owner_id == owner_id => {
                task.title = changes.title;
                task.description = changes.description;
                task.is_complete = changes.is_complete;
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            // A task owned by someone else looks exactly like no task at all
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        match tasks.get(&task_id) {
            Some(task) if task.owner_id == owner_id => {
                tasks.remove(&task_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user(name: &str) -> CreateUser {
        CreateUser {
            username: name.to_string(),
            password_hash: "$argon2id$test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_user_assigns_id() {
        let store = InMemoryCredentialStore::new();

        let user = store.insert_user(create_user("alice")).await.unwrap();
        assert_eq!(user.username, "alice");

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_insert_duplicate_username_rejected() {
        let store = InMemoryCredentialStore::new();

        store.insert_user(create_user("alice")).await.unwrap();
        let result = store.insert_user(create_user("alice")).await;

        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_username_is_case_sensitive() {
        let store = InMemoryCredentialStore::new();

        store.insert_user(create_user("alice")).await.unwrap();
        assert!(store.insert_user(create_user("Alice")).await.is_ok());
        assert!(store.find_by_username("ALICE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let store = std::sync::Arc::new(InMemoryCredentialStore::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_user(create_user("alice")).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1, "Exactly one concurrent registration wins");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let store = InMemoryTaskStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let t1 = store
            .insert_task(
                alice,
                CreateTask {
                    title: "alice task".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        store
            .insert_task(
                bob,
                CreateTask {
                    title: "bob task".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let listed = store.list_by_owner(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, t1.id);
    }

    #[tokio::test]
    async fn test_update_owned_by_other_user_matches_nothing() {
        let store = InMemoryTaskStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let task = store
            .insert_task(
                alice,
                CreateTask {
                    title: "alice task".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let changes = UpdateTask {
            title: "hijacked".to_string(),
            description: None,
            is_complete: true,
        };

        // Same outcome as a nonexistent id
        assert!(store.update_owned(bob, task.id, changes.clone()).await.unwrap().is_none());
        assert!(store
            .update_owned(bob, Uuid::new_v4(), changes)
            .await
            .unwrap()
            .is_none());

        // The task is untouched
        let listed = store.list_by_owner(alice).await.unwrap();
        assert_eq!(listed[0].title, "alice task");
        assert!(!listed[0].is_complete);
    }

    #[tokio::test]
    async fn test_delete_owned_by_other_user_matches_nothing() {
        let store = InMemoryTaskStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let task = store
            .insert_task(
                alice,
                CreateTask {
                    title: "alice task".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert!(!store.delete_owned(bob, task.id).await.unwrap());
        assert!(!store.delete_owned(alice, Uuid::new_v4()).await.unwrap());
        assert!(store.delete_owned(alice, task.id).await.unwrap());

        // Second delete sees no row
        assert!(!store.delete_owned(alice, task.id).await.unwrap());
    }
}
