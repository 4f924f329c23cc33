/// In-process store
///
/// Mirrors the PostgreSQL schema closely enough for the services and the
/// router to be exercised without a database:
///
/// - ids come from per-table counters starting at 1
/// - emails are unique (exact match, like the `UNIQUE` constraint)
/// - tasks are only reachable through their owner
///
/// # Example
///
/// ```
/// use todo_shared::models::user::CreateUser;
/// use todo_shared::store::{CredentialStore, MemoryStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let user = store.insert_user(CreateUser {
///     email: "ana@example.com".to_string(),
///     password_hash: "hash".to_string(),
/// }).await?;
/// assert_eq!(user.id, 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CredentialStore, HealthCheck, StoreError, StoreResult, TaskStore};
use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i32,
    next_task_id: i32,
}

/// Store that keeps users and tasks in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users with the given email
    pub async fn count_users_with_email(&self, email: &str) -> usize {
        let tables = self.tables.read().await;
        tables.users.iter().filter(|u| u.email == email).count()
    }

    /// Removes a user together with every task they own
    pub async fn delete_user(&self, user_id: i32) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != user_id);
        let removed = tables.users.len() != before;
        if removed {
            tables.tasks.retain(|t| t.owner_id != user_id);
        }
        removed
    }

    /// Total tasks across all owners
    pub async fn task_count(&self) -> usize {
        self.tables.read().await.tasks.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: data.email,
            password_hash: data.password_hash,
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        // Never let the wall clock step backwards relative to earlier rows
        let now = Utc::now();
        let created_at = tables
            .tasks
            .iter()
            .map(|t| t.created_at)
            .max()
            .map_or(now, |latest| latest.max(now));

        tables.next_task_id += 1;
        let task = Task {
            id: tables.next_task_id,
            owner_id: data.owner_id,
            title: data.title,
            priority: data.priority,
            completed: false,
            created_at,
        };
        tables.tasks.push(task.clone());

        Ok(task)
    }

    async fn list_tasks(&self, owner_id: i32) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        // Insertion order is creation order
        Ok(tables
            .tasks
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_task(
        &self,
        owner_id: i32,
        id: i32,
        data: UpdateTask,
    ) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        let updated = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .map(|task| {
                data.apply_to(task);
                task.clone()
            });

        Ok(updated)
    }

    async fn delete_task(&self, owner_id: i32, id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| !(t.id == id && t.owner_id == owner_id));
        Ok(tables.tasks.len() != before)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
