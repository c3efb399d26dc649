/// Board endpoints
///
/// # Endpoints
///
/// - `GET /v1/boards` - list the caller's boards
/// - `POST /v1/boards` - create a board
/// - `PUT /v1/boards/:id` - retitle a board
/// - `DELETE /v1/boards/:id` - delete a board and its tasks
///
/// The owner is always the authenticated principal; the payload cannot name
/// one.

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
    models::board::Board,
    resources::{self, boards::BoardInput},
};
use uuid::Uuid;
use validator::Validate;

/// Create/update board request
#[derive(Debug, Deserialize, Validate)]
pub struct BoardRequest {
    /// Board title
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,
}

/// Lists the caller's boards
pub async fn list_boards(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<SourcedResponse<Vec<Board>>>> {
    let boards = resources::boards::list(&state.db, &state.cache, principal.user_id).await?;

    Ok(Json(boards.into()))
}

/// Creates a board owned by the caller
pub async fn create_board(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<BoardRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<Board>>)> {
    req.validate()?;

    let board = resources::boards::create(
        &state.db,
        &state.cache,
        principal.user_id,
        BoardInput { title: req.title },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(board))))
}

/// Retitles a board the caller owns
pub async fn update_board(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<DataResponse<Board>>> {
    req.validate()?;

    let board = resources::boards::update(
        &state.db,
        &state.cache,
        principal.user_id,
        id,
        BoardInput { title: req.title },
    )
    .await?;

    Ok(Json(DataResponse::new(board)))
}

/// Deletes a board the caller owns
pub async fn delete_board(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    resources::boards::remove(&state.db, &state.cache, principal.user_id, id).await?;

    Ok(Json(MessageResponse::new("Board deleted")))
}
