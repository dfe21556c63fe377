use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::comic::{self, Entity as ComicEntity};
use crate::entity::comic_collection::{self, Entity as ComicCollectionEntity};
use crate::entity::comic_creator::Entity as ComicCreatorEntity;
use crate::error::AppResult;
use crate::models::ComicSummary;

/// Comic lookups and comic/collection links.
///
/// Every method is generic over the connection so it can run inside the
/// transaction of a composite collection operation.
pub struct ComicRepository;

impl ComicRepository {
    /// Comics of one collection, ordered by comic id
    pub async fn comics_by_collection<C>(db: &C, collection_id: i32) -> AppResult<Vec<ComicSummary>>
    where
        C: ConnectionTrait,
    {
        let mut grouped = Self::comics_by_collections(db, &[collection_id]).await?;
        Ok(grouped.remove(&collection_id).unwrap_or_default())
    }

    /// Comics of several collections in a single query, keyed by collection id.
    /// Collections without comics are absent from the map.
    pub async fn comics_by_collections<C>(
        db: &C,
        collection_ids: &[i32],
    ) -> AppResult<HashMap<i32, Vec<ComicSummary>>>
    where
        C: ConnectionTrait,
    {
        if collection_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = ComicCollectionEntity::find()
            .filter(comic_collection::Column::CollectionId.is_in(collection_ids.iter().copied()))
            .order_by_asc(comic_collection::Column::CollectionId)
            .order_by_asc(comic_collection::Column::ComicId)
            .find_also_related(ComicEntity)
            .all(db)
            .await?;

        let mut grouped: HashMap<i32, Vec<ComicSummary>> = HashMap::new();
        for (link, comic) in rows {
            if let Some(comic) = comic {
                grouped
                    .entry(link.collection_id)
                    .or_default()
                    .push(comic.into());
            }
        }

        Ok(grouped)
    }

    /// Whether the comic already lists this creator
    pub async fn has_creator<C>(db: &C, comic_id: i32, creator_id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let link = ComicCreatorEntity::find_by_id((comic_id, creator_id))
            .one(db)
            .await?;
        Ok(link.is_some())
    }

    /// Insert the comic unless a row with its id exists. Returns whether a row was written.
    pub async fn upsert<C>(db: &C, comic: &ComicSummary) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let model = comic::ActiveModel {
            comic_id: Set(comic.id),
            title: Set(comic.title.clone()),
            thumbnail_url: Set(comic.thumbnail_url.clone()),
        };

        let inserted = ComicEntity::insert(model)
            .on_conflict(
                OnConflict::column(comic::Column::ComicId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn link_to_collection<C>(db: &C, comic_id: i32, collection_id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let model = comic_collection::ActiveModel {
            comic_id: Set(comic_id),
            collection_id: Set(collection_id),
        };

        let inserted = ComicCollectionEntity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    comic_collection::Column::ComicId,
                    comic_collection::Column::CollectionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    /// Drop one comic from one collection. Returns the number of links removed.
    pub async fn unlink_from_collection<C>(
        db: &C,
        comic_id: i32,
        collection_id: i32,
    ) -> AppResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = ComicCollectionEntity::delete_many()
            .filter(comic_collection::Column::ComicId.eq(comic_id))
            .filter(comic_collection::Column::CollectionId.eq(collection_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Drop every comic link of a collection. The comic rows themselves stay.
    pub async fn unlink_all_from_collection<C>(db: &C, collection_id: i32) -> AppResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = ComicCollectionEntity::delete_many()
            .filter(comic_collection::Column::CollectionId.eq(collection_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}

// Conversion from SeaORM model to our domain model
impl From<comic::Model> for ComicSummary {
    fn from(m: comic::Model) -> Self {
        Self {
            id: m.comic_id,
            title: m.title,
            thumbnail_url: m.thumbnail_url,
        }
    }
}
