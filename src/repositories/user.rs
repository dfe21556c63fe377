use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::entity::collection::{self, Entity as CollectionEntity};
use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, User};
use crate::repositories::{ComicRepository, Repository};

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Removes the user together with their collections and those
    /// collections' comic links.
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let collection_ids: Vec<i32> = CollectionEntity::find()
            .select_only()
            .column(collection::Column::CollectionId)
            .filter(collection::Column::UserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        for collection_id in &collection_ids {
            ComicRepository::unlink_all_from_collection(&txn, *collection_id).await?;
        }
        CollectionEntity::delete_many()
            .filter(collection::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let result = UserEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            user_id = id,
            removed_collections = collection_ids.len(),
            removed = result.rows_affected > 0,
            "User removed"
        );

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::UserId)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = UserEntity::find().count(db).await?;
        Ok(count)
    }
}

impl UserRepository {
    /// Create a new user
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let model = ActiveModel {
            username: Set(input.username.clone()),
            password_hash: Set(password_hash.to_string()),
            role: Set(input.role.clone()),
            ..Default::default()
        };

        let result = model.insert(db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Username already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        tracing::debug!(user_id = result.user_id, "User registered");
        Ok(result.into())
    }

    /// Find user by username (for login)
    pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Id of the user with this username
    pub async fn find_id_by_username(db: &DatabaseConnection, username: &str) -> AppResult<i32> {
        let id: Option<i32> = UserEntity::find()
            .select_only()
            .column(Column::UserId)
            .filter(Column::Username.eq(username))
            .into_tuple()
            .one(db)
            .await?;

        id.ok_or_else(|| AppError::NotFound("User".to_string()))
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.user_id,
            username: m.username,
            password_hash: m.password_hash,
            role: m.role,
        }
    }
}

/// True when the error is a foreign key failure, such as a collection
/// pointing at a user that doesn't exist
pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
