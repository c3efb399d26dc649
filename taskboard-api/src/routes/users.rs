/// Account management endpoints
///
/// # Endpoints
///
/// - `GET /v1/users` - list all accounts (cached under the global `users` key)
/// - `PUT /v1/users/:id` - update an account
/// - `DELETE /v1/users/:id` - delete an account and everything it owns
///
/// All three require authentication. The listing is not principal-scoped;
/// accounts are directory-visible to any authenticated principal.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{DataResponse, MessageResponse, SourcedResponse},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::{middleware::Principal, password},
    models::user::{UpdateUser, User},
    resources,
};
use uuid::Uuid;
use validator::Validate;

/// Update account request
///
/// All fields optional; omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Lists all accounts
pub async fn list_users(
    State(state): State<AppState>,
    _principal: Principal,
) -> ApiResult<Json<SourcedResponse<Vec<User>>>> {
    let users = resources::users::list(&state.db, &state.cache).await?;

    Ok(Json(users.into()))
}

/// Updates an account
///
/// A new password is hashed here exactly like at registration; plaintext
/// never reaches storage.
pub async fn update_user(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<DataResponse<User>>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let user = resources::users::update(
        &state.db,
        &state.cache,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    Ok(Json(DataResponse::new(user)))
}

/// Deletes an account
pub async fn delete_user(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    resources::users::remove(&state.db, &state.cache, id).await?;

    tracing::info!(user_id = %id, "account deleted");

    Ok(Json(MessageResponse::new("User deleted")))
}
