// Library crate for Comic Vault
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    add_comic, create_collection, delete_collection, get_collection, get_collection_owner,
    get_collection_thumbnail, get_user, get_user_id_by_username, list_collections,
    list_my_collections, list_user_collections, login, me, register, remove_comic,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/users/me/collections", get(list_my_collections))
        .route("/api/collections", post(create_collection))
        .route("/api/collections/{id}", delete(delete_collection))
        .route("/api/collections/{collection_id}/comics", post(add_comic))
        .route(
            "/api/collections/{collection_id}/comics/{comic_id}",
            delete(remove_comic),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, Comic Vault!" }))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Public user lookups
        .route("/api/users/{user_id}", get(get_user))
        .route(
            "/api/users/by-username/{username}/id",
            get(get_user_id_by_username),
        )
        // Public browsing routes
        .route("/api/collections", get(list_collections))
        .route("/api/collections/{id}", get(get_collection))
        .route("/api/collections/{id}/thumbnail", get(get_collection_thumbnail))
        .route("/api/collections/{id}/owner", get(get_collection_owner))
        .route("/api/users/{user_id}/collections", get(list_user_collections))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
