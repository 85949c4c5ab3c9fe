//! Task list endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::tasks::TaskResponse;
use crate::db::TaskList;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::ListName;
use crate::services::ListWithTasks;

/// Create or rename list request
#[derive(Deserialize)]
pub struct ListNameRequest {
    pub name: String,
}

/// List summary (no tasks)
#[derive(Serialize)]
pub struct ListSummaryResponse {
    pub id: i64,
    pub name: String,
}

impl From<TaskList> for ListSummaryResponse {
    fn from(l: TaskList) -> Self {
        Self {
            id: l.id,
            name: l.name,
        }
    }
}

/// Full list with tasks
#[derive(Serialize)]
pub struct ListResponse {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<TaskResponse>,
}

impl From<ListWithTasks> for ListResponse {
    fn from(l: ListWithTasks) -> Self {
        Self {
            id: l.id,
            name: l.name,
            tasks: l.tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ListsEnvelope {
    pub lists: Vec<ListSummaryResponse>,
}

#[derive(Serialize)]
pub struct ListEnvelope {
    pub list: ListResponse,
}

impl From<ListWithTasks> for ListEnvelope {
    fn from(l: ListWithTasks) -> Self {
        Self { list: l.into() }
    }
}

/// GET /lists - all lists as summaries
async fn list_lists(State(state): State<Arc<AppState>>) -> Result<Json<ListsEnvelope>, ApiError> {
    let lists = state.lists.list_all().await?;

    Ok(Json(ListsEnvelope {
        lists: lists.into_iter().map(ListSummaryResponse::from).collect(),
    }))
}

/// POST /lists - create a list
async fn create_list(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ListNameRequest>,
) -> Result<(StatusCode, Json<ListEnvelope>), ApiError> {
    let name = ListName::new(&req.name)?;
    let list = state.lists.create(name).await?;

    Ok((StatusCode::CREATED, Json(list.into())))
}

/// GET /lists/{id} - one list with its tasks
async fn get_list(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let list = state
        .lists
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "list", id })?;

    Ok(Json(list.into()))
}

/// PUT /lists/{id} - rename a list
async fn update_list(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(req): ValidJson<ListNameRequest>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let name = ListName::new(&req.name)?;
    let list = state.lists.update(id, name).await?;

    Ok(Json(list.into()))
}

/// DELETE /lists/{id} - delete a list and its tasks
async fn delete_list(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.lists.delete(id).await? {
        return Err(ApiError::NotFound { resource: "list", id });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{id}",
            get(get_list).put(update_list).delete(delete_list),
        )
}
