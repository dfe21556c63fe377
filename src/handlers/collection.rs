use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::{validate_required, SearchParams};
use crate::middlewares::AuthUser;
use crate::models::{Collection, ComicSummary, CreateCollection};
use crate::repositories::{CollectionRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub comics: Vec<ComicSummary>,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            comics: c.comics,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionListResponse {
    pub data: Vec<CollectionResponse>,
    pub limit: u64,
    pub page: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ThumbnailResponse {
    /// Empty when the collection holds no comics
    pub thumbnail_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerResponse {
    pub user_id: i32,
}

/// Fail with 403 unless `user` owns the collection (404 if it doesn't exist)
pub(crate) async fn ensure_owner(
    state: &AppState,
    collection_id: i32,
    user: AuthUser,
) -> AppResult<()> {
    let owner = CollectionRepository::find_owner_id(&state.db, collection_id).await?;
    if owner != user.id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// ============ Handlers ============

/// Create a new collection for the current user
#[utoipa::path(
    post,
    path = "/api/collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created successfully", body = CollectionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Token user no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn create_collection(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCollectionRequest>,
) -> AppResult<(StatusCode, Json<CollectionResponse>)> {
    validate_required(&payload.name, "Name", 200)?;

    let input = CreateCollection {
        name: payload.name.trim().to_string(),
    };

    let collection = CollectionRepository::create(&state.db, user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(collection.into())))
}

/// Search collections of every user by name
#[utoipa::path(
    get,
    path = "/api/collections",
    params(SearchParams),
    responses(
        (status = 200, description = "Page of matching collections", body = CollectionListResponse)
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<CollectionListResponse>> {
    let search = params.to_search();
    let collections = CollectionRepository::search_by_name(&state.db, &search).await?;

    Ok(Json(CollectionListResponse {
        data: collections.into_iter().map(|c| c.into()).collect(),
        limit: search.limit,
        page: search.page,
    }))
}

/// Search the current user's collections by name
#[utoipa::path(
    get,
    path = "/api/users/me/collections",
    params(SearchParams),
    responses(
        (status = 200, description = "Page of matching collections", body = CollectionListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn list_my_collections(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<CollectionListResponse>> {
    let search = params.to_search();
    let collections =
        CollectionRepository::search_by_name_for_user(&state.db, &search, user.id).await?;

    Ok(Json(CollectionListResponse {
        data: collections.into_iter().map(|c| c.into()).collect(),
        limit: search.limit,
        page: search.page,
    }))
}

/// List every collection owned by a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/collections",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Collections of the user", body = [CollectionResponse])
    ),
    tag = "Collections"
)]
pub async fn list_user_collections(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<CollectionResponse>>> {
    let collections = CollectionRepository::list_by_user(&state.db, user_id).await?;
    Ok(Json(collections.into_iter().map(|c| c.into()).collect()))
}

/// Get a collection by ID
#[utoipa::path(
    get,
    path = "/api/collections/{id}",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection details", body = CollectionResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CollectionResponse>> {
    let collection = CollectionRepository::find_by_id(&state.db, id).await?;
    Ok(Json(collection.into()))
}

/// Cover image for a collection
#[utoipa::path(
    get,
    path = "/api/collections/{id}/thumbnail",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Thumbnail of one comic in the collection", body = ThumbnailResponse)
    ),
    tag = "Collections"
)]
pub async fn get_collection_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ThumbnailResponse>> {
    let thumbnail_url = CollectionRepository::thumbnail(&state.db, id)
        .await?
        .unwrap_or_default();
    Ok(Json(ThumbnailResponse { thumbnail_url }))
}

/// Owner of a collection
#[utoipa::path(
    get,
    path = "/api/collections/{id}/owner",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Owning user", body = OwnerResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn get_collection_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OwnerResponse>> {
    let user_id = CollectionRepository::find_owner_id(&state.db, id).await?;
    Ok(Json(OwnerResponse { user_id }))
}

/// Delete a collection and its comic links
#[utoipa::path(
    delete,
    path = "/api/collections/{id}",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 204, description = "Collection deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Collection belongs to another user"),
        (status = 404, description = "Collection not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Collections"
)]
pub async fn delete_collection(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, id, user).await?;
    CollectionRepository::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
