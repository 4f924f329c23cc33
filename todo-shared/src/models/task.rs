/// Task model and database operations
///
/// Every query here is scoped by `owner_id`. A task that exists but belongs
/// to someone else is indistinguishable from one that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     priority TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::task::{Task, CreateTask, UpdateTask};
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     owner_id: 1,
///     title: "Buy milk".to_string(),
///     priority: "Alta".to_string(),
/// }).await?;
///
/// Task::update(&pool, 1, task.id, UpdateTask {
///     completed: Some(true),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::cmp::Ordering;

/// Task priority
///
/// Clients send localized labels. The label is stored verbatim; this enum
/// only exists to rank tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parses a stored label
    ///
    /// Both `"Média"` and `"Media"` map to `Medium`. Anything unrecognized
    /// returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Alta" => Some(Priority::High),
            "Média" | "Media" => Some(Priority::Medium),
            "Baixa" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Sort rank of a label: High = 3, Medium = 2, Low = 1, unmapped = 0
    pub fn rank(label: &str) -> u8 {
        match Self::from_label(label) {
            Some(Priority::High) => 3,
            Some(Priority::Medium) => 2,
            Some(Priority::Low) => 1,
            None => 0,
        }
    }
}

/// Task owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i32,

    /// Owning user; never sent to clients
    #[serde(skip_serializing, default)]
    pub owner_id: i32,

    /// Non-empty title
    pub title: String,

    /// Priority label as sent by the client (e.g. "Alta")
    pub priority: String,

    /// Whether the task is done
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Listing order: priority rank descending, then creation time ascending,
    /// then id ascending
    pub fn listing_order(a: &Task, b: &Task) -> Ordering {
        Priority::rank(&b.priority)
            .cmp(&Priority::rank(&a.priority))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub owner_id: i32,
    pub title: String,
    pub priority: String,
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    /// Applies the present fields to `task` in place
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(priority) = &self.priority {
            task.priority = priority.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

impl Task {
    /// Inserts a task with `completed = false` and `created_at = NOW()`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, priority)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, priority, completed, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.priority)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists an owner's tasks in creation order
    ///
    /// Priority ranking is applied by the task service, not here.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, priority, completed, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update in a single statement
    ///
    /// Returns `None` when no task with `id` belongs to `owner_id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: i32,
        id: i32,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                priority = COALESCE($4, priority),
                completed = COALESCE($5, completed)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, priority, completed, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.priority)
        .bind(data.completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns `false` when no task with `id` belongs to `owner_id`.
    pub async fn delete(pool: &PgPool, owner_id: i32, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
