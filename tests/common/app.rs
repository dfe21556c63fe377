use axum_test::TestServer;
use comic_vault::build_router;
use comic_vault::config::Config;
use comic_vault::entity::{collection, comic, comic_collection, comic_creator, creator, user};
use comic_vault::state::AppState;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tempfile::TempDir;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_hours: 24,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper backed by a throwaway SQLite file
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    _db_dir: TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let (db_dir, db) = test_database().await;
        let state = AppState::with_connection(test_config(), db);

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            state,
            _db_dir: db_dir,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }
}

/// Open a fresh SQLite database with every table created from the entities
pub async fn test_database() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("comic_vault.db").display()
    );

    let db = Database::connect(&url)
        .await
        .expect("Failed to open test database");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        backend.build(&schema.create_table_from_entity(user::Entity)),
        backend.build(&schema.create_table_from_entity(collection::Entity)),
        backend.build(&schema.create_table_from_entity(comic::Entity)),
        backend.build(&schema.create_table_from_entity(creator::Entity)),
        backend.build(&schema.create_table_from_entity(comic_collection::Entity)),
        backend.build(&schema.create_table_from_entity(comic_creator::Entity)),
    ];
    for statement in statements {
        db.execute(statement)
            .await
            .expect("Failed to create test schema");
    }

    (dir, db)
}
