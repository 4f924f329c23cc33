/// Owner-scoped task operations
///
/// Ownership is part of existence: a task id that belongs to another user
/// produces the same `NotFound` as an id that was never issued.

use std::sync::Arc;
use tracing::{debug, info};

use super::{has_content, ServiceError, ServiceResult};
use crate::{
    models::task::{CreateTask, Task, UpdateTask},
    store::TaskStore,
};

/// Task service
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Lists the owner's tasks: highest priority first, oldest first within
    /// a priority, unrecognized priorities last
    pub async fn list_tasks(&self, owner_id: i32) -> ServiceResult<Vec<Task>> {
        let mut tasks = self.store.list_tasks(owner_id).await?;
        tasks.sort_by(Task::listing_order);

        debug!(owner_id, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Creates a task with `completed = false`
    ///
    /// # Errors
    ///
    /// `Validation` if the title or the priority is empty
    pub async fn create_task(
        &self,
        owner_id: i32,
        title: &str,
        priority: &str,
    ) -> ServiceResult<Task> {
        if !has_content(title) || !has_content(priority) {
            return Err(ServiceError::Validation(
                "Title and priority are required".to_string(),
            ));
        }

        let task = self
            .store
            .insert_task(CreateTask {
                owner_id,
                title: title.to_string(),
                priority: priority.to_string(),
            })
            .await?;

        info!(owner_id, task_id = task.id, "Task created");
        Ok(task)
    }

    /// Applies a partial update; absent fields keep their value
    ///
    /// # Errors
    ///
    /// - `NotFound` if the task does not exist for this owner
    /// - `Validation` if a provided title or priority is empty
    pub async fn update_task(
        &self,
        owner_id: i32,
        task_id: i32,
        changes: UpdateTask,
    ) -> ServiceResult<Task> {
        let blank_title = changes.title.as_deref().is_some_and(|t| !has_content(t));
        let blank_priority = changes.priority.as_deref().is_some_and(|p| !has_content(p));
        if blank_title || blank_priority {
            return Err(ServiceError::Validation(
                "Title and priority cannot be empty".to_string(),
            ));
        }

        let task = self
            .store
            .update_task(owner_id, task_id, changes)
            .await?
            .ok_or(ServiceError::NotFound)?;

        info!(owner_id, task_id, completed = task.completed, "Task updated");
        Ok(task)
    }

    /// Deletes a task
    ///
    /// Deleting the same id twice fails the second time with `NotFound`.
    pub async fn delete_task(&self, owner_id: i32, task_id: i32) -> ServiceResult<()> {
        if !self.store.delete_task(owner_id, task_id).await? {
            return Err(ServiceError::NotFound);
        }

        info!(owner_id, task_id, "Task deleted");
        Ok(())
    }
}
