/// Persistence seams for the services
///
/// The services never talk to `sqlx` directly; they hold trait objects for
/// the two stores. [`PgStore`] is the production implementation.
/// [`MemoryStore`] keeps everything in process and follows the same rules
/// (unique emails, owner-scoped reads and writes), which makes it suitable
/// for tests.
///
/// # Store contract
///
/// - `insert_user` fails with [`StoreError::DuplicateEmail`] when the email exists
/// - task reads, updates, and deletes only ever see rows whose `owner_id`
///   matches the caller
/// - `list_tasks` returns rows in creation order (`created_at`, then `id`)
/// - every operation is a single atomic step

use async_trait::async_trait;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Postgres SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Email uniqueness constraint rejected the insert
    #[error("Email already registered")]
    DuplicateEmail,

    /// Anything else the database reported
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::DuplicateEmail;
            }
        }
        StoreError::Database(err)
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Users and their password hashes
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a user; the store enforces email uniqueness
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Looks up a user by exact email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// Tasks, always addressed through their owner
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task with `completed = false` and `created_at = now`
    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// All tasks of `owner_id` in creation order
    async fn list_tasks(&self, owner_id: i32) -> StoreResult<Vec<Task>>;

    /// Partial update; `None` if the task does not exist for this owner
    async fn update_task(&self, owner_id: i32, id: i32, data: UpdateTask)
        -> StoreResult<Option<Task>>;

    /// Deletes; `false` if the task does not exist for this owner
    async fn delete_task(&self, owner_id: i32, id: i32) -> StoreResult<bool>;
}

/// Connectivity probe used by the health endpoint
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}
