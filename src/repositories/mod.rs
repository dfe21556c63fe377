pub mod collection;
pub mod comic;
pub mod creator;
pub mod user;

pub use collection::CollectionRepository;
pub use comic::ComicRepository;
pub use creator::CreatorRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Base repository trait for common CRUD operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<T>;

    /// Delete entity by ID; deleting a missing entity is a no-op
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()>;

    /// List entities with pagination
    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<T>>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}
