use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entity::collection::{self, ActiveModel, Column, Entity as CollectionEntity};
use crate::entity::comic::{self, Entity as ComicEntity};
use crate::entity::comic_collection::{self, Entity as ComicCollectionEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CatalogComic, Collection, CollectionSearch, ComicSummary, CreateCollection};
use crate::repositories::user::is_foreign_key_violation;
use crate::repositories::{ComicRepository, CreatorRepository, Repository};

/// Collection repository for database operations
pub struct CollectionRepository;

#[async_trait]
impl Repository<Collection> for CollectionRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Collection> {
        let model = CollectionEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        let comics = ComicRepository::comics_by_collection(db, model.collection_id).await?;
        Ok(to_domain(model, comics))
    }

    /// Removes the collection's comic links first, then the collection row,
    /// in one transaction.
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let unlinked = ComicRepository::unlink_all_from_collection(&txn, id).await?;
        let result = CollectionEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            collection_id = id,
            unlinked_comics = unlinked,
            removed = result.rows_affected > 0,
            "Collection removed"
        );

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Collection>> {
        ensure_page_size(limit)?;

        let models = CollectionEntity::find()
            .order_by_asc(Column::CollectionId)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Self::with_comics(db, models).await
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = CollectionEntity::find().count(db).await?;
        Ok(count)
    }
}

impl CollectionRepository {
    /// Create a new collection owned by `user_id`; the user must exist
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        input: &CreateCollection,
    ) -> AppResult<Collection> {
        let model = ActiveModel {
            user_id: Set(user_id),
            collection_name: Set(input.name.clone()),
            ..Default::default()
        };

        let result = model.insert(db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::NotFound("User".to_string())
            } else {
                AppError::from(e)
            }
        })?;
        tracing::debug!(
            collection_id = result.collection_id,
            user_id,
            "Collection created"
        );

        Ok(to_domain(result, Vec::new()))
    }

    /// Every collection, ordered by id
    pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .order_by_asc(Column::CollectionId)
            .all(db)
            .await?;

        Self::with_comics(db, models).await
    }

    /// Every collection owned by a user, ordered by id
    pub async fn list_by_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CollectionId)
            .all(db)
            .await?;

        Self::with_comics(db, models).await
    }

    /// One page of collections whose name contains `search.name`, any owner
    pub async fn search_by_name(
        db: &DatabaseConnection,
        search: &CollectionSearch,
    ) -> AppResult<Vec<Collection>> {
        Self::search(db, search, None).await
    }

    /// One page of `user_id`'s collections whose name contains `search.name`
    pub async fn search_by_name_for_user(
        db: &DatabaseConnection,
        search: &CollectionSearch,
        user_id: i32,
    ) -> AppResult<Vec<Collection>> {
        Self::search(db, search, Some(user_id)).await
    }

    /// Owner of a collection
    pub async fn find_owner_id(db: &DatabaseConnection, id: i32) -> AppResult<i32> {
        let owner: Option<i32> = CollectionEntity::find_by_id(id)
            .select_only()
            .column(Column::UserId)
            .into_tuple()
            .one(db)
            .await?;

        owner.ok_or_else(|| AppError::NotFound("Collection".to_string()))
    }

    /// Thumbnail of the lowest-id comic in the collection, if it has any comics
    pub async fn thumbnail(db: &DatabaseConnection, id: i32) -> AppResult<Option<String>> {
        let thumbnail: Option<String> = ComicEntity::find()
            .inner_join(ComicCollectionEntity)
            .filter(comic_collection::Column::CollectionId.eq(id))
            .order_by_asc(comic::Column::ComicId)
            .select_only()
            .column(comic::Column::ThumbnailUrl)
            .into_tuple()
            .one(db)
            .await?;

        Ok(thumbnail)
    }

    /// Store a catalog comic and file it under the collection.
    ///
    /// Comic, link, creator and credit rows are all insert-if-absent, so
    /// repeating the call for the same comic and collection changes nothing.
    /// Creators without a usable resource URI are skipped.
    pub async fn add_comic(
        db: &DatabaseConnection,
        collection_id: i32,
        record: &CatalogComic,
    ) -> AppResult<()> {
        let comic = ComicSummary {
            id: record.id,
            title: record.title.clone(),
            thumbnail_url: record.thumbnail_url(),
        };

        let txn = db.begin().await?;

        ComicRepository::upsert(&txn, &comic).await?;
        ComicRepository::link_to_collection(&txn, comic.id, collection_id).await?;

        for reference in &record.creators.items {
            if reference.resource_uri.is_none() {
                continue;
            }

            let creator = match reference.to_creator() {
                Some(creator) => creator,
                None => {
                    tracing::warn!(
                        comic_id = comic.id,
                        resource_uri = reference.resource_uri.as_deref().unwrap_or_default(),
                        "Skipping creator without a numeric id"
                    );
                    continue;
                }
            };

            CreatorRepository::upsert(&txn, &creator).await?;
            if !ComicRepository::has_creator(&txn, comic.id, creator.id).await? {
                CreatorRepository::link_to_comic(&txn, comic.id, creator.id).await?;
            }
        }

        txn.commit().await?;

        tracing::debug!(collection_id, comic_id = comic.id, "Comic added to collection");
        Ok(())
    }

    /// Take one comic out of one collection. Other links are untouched.
    pub async fn remove_comic(
        db: &DatabaseConnection,
        collection_id: i32,
        comic_id: i32,
    ) -> AppResult<()> {
        let removed = ComicRepository::unlink_from_collection(db, comic_id, collection_id).await?;
        tracing::debug!(collection_id, comic_id, removed, "Comic removed from collection");
        Ok(())
    }

    async fn search(
        db: &DatabaseConnection,
        search: &CollectionSearch,
        owner: Option<i32>,
    ) -> AppResult<Vec<Collection>> {
        ensure_page_size(search.limit)?;

        let pattern = format!("%{}%", escape_like(&search.name.to_lowercase()));
        let mut query = CollectionEntity::find().filter(
            Expr::expr(Func::lower(Expr::col((
                CollectionEntity,
                Column::CollectionName,
            ))))
            .like(LikeExpr::new(pattern).escape('\\')),
        );

        if let Some(user_id) = owner {
            query = query.filter(Column::UserId.eq(user_id));
        }

        let models = query
            .order_by_asc(Column::CollectionId)
            .paginate(db, search.limit)
            .fetch_page(search.page)
            .await?;

        Self::with_comics(db, models).await
    }

    async fn with_comics<C>(db: &C, models: Vec<collection::Model>) -> AppResult<Vec<Collection>>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<i32> = models.iter().map(|m| m.collection_id).collect();
        let mut comics = ComicRepository::comics_by_collections(db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let list = comics.remove(&m.collection_id).unwrap_or_default();
                to_domain(m, list)
            })
            .collect())
    }
}

fn ensure_page_size(limit: u64) -> AppResult<()> {
    if limit == 0 {
        return Err(AppError::Validation(
            "Page size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Escape LIKE wildcards so the filter text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// Conversion from SeaORM model to our domain model
fn to_domain(m: collection::Model, comics: Vec<ComicSummary>) -> Collection {
    Collection {
        id: m.collection_id,
        user_id: m.user_id,
        name: m.collection_name,
        comics,
    }
}
