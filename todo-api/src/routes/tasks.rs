/// Task endpoints
///
/// All routes sit behind the bearer authentication layer and act only on the
/// caller's own tasks.
///
/// - `GET /api/tasks` - list, highest priority first
/// - `POST /api/tasks` - create
/// - `PUT /api/tasks/:id` - partial update
/// - `DELETE /api/tasks/:id` - delete

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_shared::{
    auth::middleware::AuthContext,
    models::task::{Task, UpdateTask},
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(required(message = "Title and priority are required"))]
    pub title: Option<String>,

    /// Priority label, e.g. "Alta", "Média", "Baixa"
    #[validate(required(message = "Title and priority are required"))]
    pub priority: Option<String>,
}

/// Update task request; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

impl From<UpdateTaskRequest> for UpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            priority: req.priority,
            completed: req.completed,
        }
    }
}

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
}

/// List the caller's tasks
///
/// Ordered by priority (Alta, Média, Baixa, then anything else), oldest
/// first within a priority.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_tasks(auth.user_id).await?;
    Ok(Json(tasks))
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <token>
///
/// { "title": "Buy milk", "priority": "Alta" }
/// ```
///
/// # Errors
///
/// - `400`: title or priority missing/empty
/// - `401`: missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(req) = payload?;
    req.validate()?;

    let title = req.title.unwrap_or_default();
    let priority = req.priority.unwrap_or_default();

    let task = state
        .tasks
        .create_task(auth.user_id, &title, &priority)
        .await?;

    Ok(Json(task))
}

/// Update a task
///
/// ```text
/// PUT /api/tasks/42
/// Authorization: Bearer <token>
///
/// { "completed": true }
/// ```
///
/// # Errors
///
/// - `400`: unreadable body, or a provided title or priority is empty
/// - `401`: missing or invalid token
/// - `404`: no such task for this user, whatever the body
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(&id)?;

    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            // An empty change set is a pure existence check for this owner
            state
                .tasks
                .update_task(auth.user_id, task_id, UpdateTask::default())
                .await?;
            return Err(rejection.into());
        }
    };

    let task = state
        .tasks
        .update_task(auth.user_id, task_id, req.into())
        .await?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `401`: missing or invalid token
/// - `404`: no such task for this user (including one already deleted)
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let task_id = parse_task_id(&id)?;

    state.tasks.delete_task(auth.user_id, task_id).await?;

    Ok(Json(DeleteTaskResponse { success: true }))
}

/// Ids that are not integers cannot name a task
fn parse_task_id(raw: &str) -> ApiResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::NotFound("Task not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(matches!(parse_task_id("abc"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_task_id("99999999999"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_update_request_defaults_to_no_changes() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(UpdateTask::from(req), UpdateTask::default());
    }

    #[test]
    fn test_create_request_requires_both_fields() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "x", "priority": "Alta"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
