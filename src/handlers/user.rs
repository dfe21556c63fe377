use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::models::UserResponse;
use crate::repositories::{Repository, UserRepository};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserIdResponse {
    pub user_id: i32,
}

/// Public profile of a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepository::find_by_id(&state.db, user_id).await?;
    Ok(Json(user.into()))
}

/// Resolve a username to its user id
#[utoipa::path(
    get,
    path = "/api/users/by-username/{username}/id",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "User id", body = UserIdResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user_id_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserIdResponse>> {
    let user_id = UserRepository::find_id_by_username(&state.db, &username).await?;
    Ok(Json(UserIdResponse { user_id }))
}
