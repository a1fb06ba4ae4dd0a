//! List and task API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::SharedState;
use crate::domain::{ListId, Task, TaskId, ToDoList, TodoError};

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Create list / rename list request
#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

/// Create task / edit task request
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub lists: usize,
}

fn parse_list_id(list_id: &str) -> Result<ListId, ApiError> {
    Ok(list_id.trim().parse()?)
}

fn parse_ids(list_id: &str, task_id: &str) -> Result<(ListId, TaskId), ApiError> {
    Ok((parse_list_id(list_id)?, task_id.trim().parse()?))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let lists = state.read(|c| c.len()).await;
    Json(HealthResponse { status: "ok", lists })
}

/// GET /lists
pub async fn list_lists(State(state): State<SharedState>) -> Json<Vec<ToDoList>> {
    Json(state.read(|c| c.lists().to_vec()).await)
}

/// POST /lists
pub async fn create_list(
    State(state): State<SharedState>,
    payload: Result<Json<TitleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ToDoList>), ApiError> {
    let Json(req) = payload?;
    let list = state.mutate(move |c| c.add(req.title).cloned()).await?;
    tracing::info!("Created list {} ({})", list.id, list.title);
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists/last
pub async fn last_list(State(state): State<SharedState>) -> Json<Option<ToDoList>> {
    Json(state.read(|c| c.last_to_do_list().cloned()).await)
}

/// GET /lists/{listId}
pub async fn get_list(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
) -> Result<Json<ToDoList>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    state
        .read(|c| c.get(&list_id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| TodoError::ListNotFound(list_id).into())
}

/// PATCH /lists/{listId}
pub async fn rename_list(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
    payload: Result<Json<TitleRequest>, JsonRejection>,
) -> Result<Json<ToDoList>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let Json(req) = payload?;
    let list = state
        .mutate(move |c| c.change_to_do_list_title(&list_id, req.title).cloned())
        .await?;
    tracing::info!("Renamed list {} to {}", list.id, list.title);
    Ok(Json(list))
}

/// DELETE /lists/{listId}
pub async fn delete_list(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
) -> Result<Json<ToDoList>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let list = state.mutate(move |c| c.delete(&list_id)).await?;
    tracing::info!("Deleted list {}", list.id);
    Ok(Json(list))
}

/// POST /lists/{listId}/tasks
pub async fn create_task(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let Json(req) = payload?;
    let task = state
        .mutate(move |c| c.add_task(&list_id, req.text).cloned())
        .await?;
    tracing::info!("Created task {} in {}", task.id, list_id);
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /lists/{listId}/tasks/last
pub async fn last_task(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
) -> Result<Json<Option<Task>>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let task = state
        .read(|c| c.get_last_task(&list_id).map(|t| t.cloned()))
        .await?;
    Ok(Json(task))
}

/// PATCH /lists/{listId}/tasks/{taskId}
pub async fn edit_task(
    State(state): State<SharedState>,
    Path((list_id, task_id)): Path<(String, String)>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let (list_id, task_id) = parse_ids(&list_id, &task_id)?;
    let Json(req) = payload?;
    let task = state
        .mutate(move |c| c.change_task_text(&list_id, &task_id, req.text).cloned())
        .await?;
    tracing::info!("Changed text of {} in {}", task.id, list_id);
    Ok(Json(task))
}

/// DELETE /lists/{listId}/tasks/{taskId}
pub async fn delete_task(
    State(state): State<SharedState>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    let (list_id, task_id) = parse_ids(&list_id, &task_id)?;
    let task = state
        .mutate(move |c| c.delete_task(&list_id, &task_id))
        .await?;
    tracing::info!("Deleted task {} from {}", task.id, list_id);
    Ok(Json(task))
}

/// POST /lists/{listId}/tasks/{taskId}/toggle
pub async fn toggle_task(
    State(state): State<SharedState>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    let (list_id, task_id) = parse_ids(&list_id, &task_id)?;
    let task = state
        .mutate(move |c| c.toggle_task_status(&list_id, &task_id).cloned())
        .await?;
    tracing::info!("Toggled {} in {} (done: {})", task.id, list_id, task.has_done);
    Ok(Json(task))
}
