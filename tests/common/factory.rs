use comic_vault::entity::user;
use comic_vault::models::{
    CatalogComic, CatalogImage, CatalogSeries, Collection, CreateCollection, CreateUser,
    CreatorList, CreatorReference, User, DEFAULT_ROLE,
};
use comic_vault::repositories::{CollectionRepository, UserRepository};
use comic_vault::services::AuthService;
use comic_vault::state::AppState;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Test authentication data
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: i32,
    pub username: String,
    pub token: String,
}

#[allow(dead_code)]
impl TestAuth {
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Register a user through the repository and sign a token for them
    pub async fn create_user(&self, username: &str) -> TestAuth {
        let user = self.create_user_with_password(username, TEST_PASSWORD).await;
        let token = AuthService::generate_token(user.id, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            username: user.username,
            token,
        }
    }

    /// Create a user with a specific password
    pub async fn create_user_with_password(&self, username: &str, password: &str) -> User {
        let input = CreateUser {
            username: username.to_string(),
            role: DEFAULT_ROLE.to_string(),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap()
    }

    /// Make sure a user row with this exact id exists, so collections can
    /// reference it. The stored hash is not a valid login.
    pub async fn ensure_user(&self, user_id: i32) {
        let model = user::ActiveModel {
            user_id: Set(user_id),
            username: Set(format!("user{}", user_id)),
            password_hash: Set("unusable".to_string()),
            role: Set(DEFAULT_ROLE.to_string()),
        };

        user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.state.db)
            .await
            .unwrap();
    }

    /// Authorization header value for a user, creating the user if needed
    pub async fn auth_header(&self, user_id: i32) -> String {
        self.ensure_user(user_id).await;
        let token = AuthService::generate_token(user_id, &self.state.config).unwrap();
        format!("Bearer {}", token)
    }

    /// Create a collection with a specific name, creating its owner if needed
    pub async fn create_collection(&self, user_id: i32, name: &str) -> Collection {
        self.ensure_user(user_id).await;

        let input = CreateCollection {
            name: name.to_string(),
        };

        CollectionRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }

    /// Catalog record with the given creators as `(resource_uri, name)` pairs
    pub fn catalog_comic(&self, id: i32, creators: &[(Option<&str>, &str)]) -> CatalogComic {
        CatalogComic {
            id,
            title: format!("Test Comic #{}", id),
            issue_number: id as f64,
            series: Some(CatalogSeries {
                name: "Test Series".to_string(),
            }),
            thumbnail: CatalogImage {
                path: format!("http://i.annihil.us/u/prod/marvel/i/mg/test/{}", id),
                extension: "jpg".to_string(),
            },
            creators: CreatorList {
                items: creators
                    .iter()
                    .map(|(uri, name)| CreatorReference {
                        resource_uri: uri.map(str::to_string),
                        name: name.to_string(),
                    })
                    .collect(),
            },
        }
    }

    /// Catalog record without creators
    pub fn plain_comic(&self, id: i32) -> CatalogComic {
        self.catalog_comic(id, &[])
    }

    /// Store a catalog comic in a collection
    pub async fn add_comic(&self, collection_id: i32, comic: &CatalogComic) {
        CollectionRepository::add_comic(&self.state.db, collection_id, comic)
            .await
            .unwrap()
    }
}
