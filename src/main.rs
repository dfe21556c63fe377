use anyhow::Context;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use comic_vault::config::Config;
use comic_vault::handlers::{
    AuthResponse, CollectionListResponse, CollectionResponse, CreateCollectionRequest,
    LoginRequest, OwnerResponse, RegisterRequest, ThumbnailResponse, UserIdResponse,
};
use comic_vault::models::{
    CatalogComic, CatalogImage, CatalogSeries, Comic, ComicSummary, CreatorList,
    CreatorReference, UserResponse,
};
use comic_vault::state::AppState;
use comic_vault::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::user::get_user,
        handlers::user::get_user_id_by_username,
        handlers::collection::create_collection,
        handlers::collection::list_collections,
        handlers::collection::list_my_collections,
        handlers::collection::list_user_collections,
        handlers::collection::get_collection,
        handlers::collection::get_collection_thumbnail,
        handlers::collection::get_collection_owner,
        handlers::collection::delete_collection,
        handlers::comic::add_comic,
        handlers::comic::remove_comic,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UserIdResponse,
        CreateCollectionRequest,
        CollectionResponse,
        CollectionListResponse,
        ThumbnailResponse,
        OwnerResponse,
        ComicSummary,
        Comic,
        CatalogComic,
        CatalogImage,
        CatalogSeries,
        CreatorList,
        CreatorReference,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and the current user"),
        (name = "Users", description = "Public user lookups"),
        (name = "Collections", description = "Comic collection management endpoints"),
        (name = "Comics", description = "Adding and removing catalog comics in a collection")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;
    let addr = config.server_addr();

    // Initialize application state (runs migrations, opens the pool)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("failed to initialize application state")?;
    tracing::info!("Database connection established");

    let app = build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
