/// Task endpoints
///
/// # Endpoints
///
/// - `GET /v1/tasks` - list every task on the caller's boards
/// - `POST /v1/tasks` - create a task on one of the caller's boards
/// - `GET /v1/tasks/:id` - fetch a single task
/// - `PUT /v1/tasks/:id` - update a task, optionally moving it between boards
/// - `DELETE /v1/tasks/:id` - delete a task
///
/// The payload carries the board foreign key, so the resource layer
/// re-verifies board ownership on create and on every move.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{DataResponse, MessageResponse, SourcedResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::Principal,
    models::task::Task,
    resources::{
        self,
        tasks::{NewTask, TaskUpdate},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Workflow status; defaults to "todo"
    pub status: Option<String>,

    /// Board to create the task on
    pub board_id: Uuid,
}

/// Update task request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    /// New description
    #[serde(default)]
    pub description: String,

    /// New status; omitted keeps the current one
    pub status: Option<String>,

    /// Target board; a different board is a move and re-checks ownership
    pub board_id: Option<Uuid>,
}

/// Lists every task on the caller's boards
pub async fn list_tasks(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<SourcedResponse<Vec<Task>>>> {
    let tasks = resources::tasks::list(&state.db, &state.cache, principal.user_id).await?;

    Ok(Json(tasks.into()))
}

/// Fetches a single task the caller owns
pub async fn get_task(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SourcedResponse<Task>>> {
    let task = resources::tasks::get(&state.db, &state.cache, principal.user_id, id).await?;

    Ok(Json(task.into()))
}

/// Creates a task on a board the caller owns
pub async fn create_task(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<Task>>)> {
    req.validate()?;

    let task = resources::tasks::create(
        &state.db,
        &state.cache,
        principal.user_id,
        NewTask {
            title: req.title,
            description: req.description,
            status: req.status,
            board_id: req.board_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(task))))
}

/// Updates a task the caller owns
pub async fn update_task(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<DataResponse<Task>>> {
    req.validate()?;

    let task = resources::tasks::update(
        &state.db,
        &state.cache,
        principal.user_id,
        id,
        TaskUpdate {
            title: req.title,
            description: req.description,
            status: req.status,
            board_id: req.board_id,
        },
    )
    .await?;

    Ok(Json(DataResponse::new(task)))
}

/// Deletes a task the caller owns
pub async fn delete_task(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    resources::tasks::remove(&state.db, &state.cache, principal.user_id, id).await?;

    Ok(Json(MessageResponse::new("Task deleted")))
}
