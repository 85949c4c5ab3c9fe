//! Task endpoints, nested under their list

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::Task;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::TaskTitle;
use crate::services::TaskPatch;

/// Create task request
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

/// Partial task update. Omitted and `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "completed")]
    pub is_completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn into_patch(self) -> Result<TaskPatch, ApiError> {
        let title = self.title.as_deref().map(TaskTitle::new).transpose()?;

        Ok(TaskPatch {
            title,
            is_completed: self.is_completed,
        })
    }
}

/// Task response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub list_id: i64,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            is_completed: t.is_completed,
            list_id: t.list_id,
        }
    }
}

#[derive(Serialize)]
pub struct TaskEnvelope {
    pub task: TaskResponse,
}

impl From<Task> for TaskEnvelope {
    fn from(t: Task) -> Self {
        Self { task: t.into() }
    }
}

/// POST /lists/{list_id}/tasks - add a task to a list
async fn create_task(
    State(state): State<Arc<AppState>>,
    ValidPath(list_id): ValidPath<i64>,
    ValidJson(req): ValidJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskEnvelope>), ApiError> {
    let title = TaskTitle::new(&req.title)?;
    let task = state
        .tasks
        .create(list_id, title)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "list",
            id: list_id,
        })?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// GET /lists/{list_id}/tasks/{task_id} - a single task
async fn get_task(
    State(state): State<Arc<AppState>>,
    ValidPath((list_id, task_id)): ValidPath<(i64, i64)>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let task = state
        .tasks
        .get_by_id(list_id, task_id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "task",
            id: task_id,
        })?;

    Ok(Json(task.into()))
}

/// PUT /lists/{list_id}/tasks/{task_id} - partial update
async fn update_task(
    State(state): State<Arc<AppState>>,
    ValidPath((list_id, task_id)): ValidPath<(i64, i64)>,
    ValidJson(req): ValidJson<UpdateTaskRequest>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let patch = req.into_patch()?;
    let task = state
        .tasks
        .update(list_id, task_id, patch)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "task",
            id: task_id,
        })?;

    Ok(Json(task.into()))
}

/// Task routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists/{list_id}/tasks", post(create_task))
        .route(
            "/lists/{list_id}/tasks/{task_id}",
            get(get_task).put(update_task),
        )
}
