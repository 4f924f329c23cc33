/// PostgreSQL-backed store
///
/// Thin adapter from the store traits onto the model queries. Cloning is
/// cheap: `PgPool` is reference counted.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CredentialStore, HealthCheck, StoreResult, TaskStore};
use crate::{
    db::pool,
    models::{
        task::{CreateTask, Task, UpdateTask},
        user::{CreateUser, User},
    },
};

/// Store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn list_tasks(&self, owner_id: i32) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn update_task(
        &self,
        owner_id: i32,
        id: i32,
        data: UpdateTask,
    ) -> StoreResult<Option<Task>> {
        Ok(Task::update(&self.pool, owner_id, id, data).await?)
    }

    async fn delete_task(&self, owner_id: i32, id: i32) -> StoreResult<bool> {
        Ok(Task::delete(&self.pool, owner_id, id).await?)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
