use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::handlers::collection::ensure_owner;
use crate::middlewares::AuthUser;
use crate::models::{CatalogComic, Comic};
use crate::repositories::CollectionRepository;
use crate::state::AppState;

/// Add a catalog comic to a collection
#[utoipa::path(
    post,
    path = "/api/collections/{collection_id}/comics",
    params(
        ("collection_id" = i32, Path, description = "Collection ID")
    ),
    request_body = CatalogComic,
    responses(
        (status = 201, description = "Comic filed under the collection", body = Comic),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Collection belongs to another user"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comics"
)]
pub async fn add_comic(
    user: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<i32>,
    Json(payload): Json<CatalogComic>,
) -> AppResult<(StatusCode, Json<Comic>)> {
    ensure_owner(&state, collection_id, user).await?;
    CollectionRepository::add_comic(&state.db, collection_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(payload.to_display())))
}

/// Remove a comic from a collection
#[utoipa::path(
    delete,
    path = "/api/collections/{collection_id}/comics/{comic_id}",
    params(
        ("collection_id" = i32, Path, description = "Collection ID"),
        ("comic_id" = i32, Path, description = "Catalog comic ID")
    ),
    responses(
        (status = 204, description = "Comic removed from the collection"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Collection belongs to another user"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comics"
)]
pub async fn remove_comic(
    user: AuthUser,
    State(state): State<AppState>,
    Path((collection_id, comic_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, collection_id, user).await?;
    CollectionRepository::remove_comic(&state.db, collection_id, comic_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
