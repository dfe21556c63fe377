use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::comic_creator::{self, Entity as ComicCreatorEntity};
use crate::entity::creator::{self, Entity as CreatorEntity};
use crate::error::AppResult;
use crate::models::Creator;

/// Creator rows and comic/creator links
pub struct CreatorRepository;

impl CreatorRepository {
    /// Insert the creator unless a row with its id exists
    pub async fn upsert<C>(db: &C, creator: &Creator) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let model = creator::ActiveModel {
            creator_id: Set(creator.id),
            first_name: Set(creator.first_name.clone()),
            last_name: Set(creator.last_name.clone()),
            thumbnail_url: Set(creator.thumbnail_url.clone()),
        };

        let inserted = CreatorEntity::insert(model)
            .on_conflict(
                OnConflict::column(creator::Column::CreatorId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn link_to_comic<C>(db: &C, comic_id: i32, creator_id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let model = comic_creator::ActiveModel {
            comic_id: Set(comic_id),
            creator_id: Set(creator_id),
        };

        let inserted = ComicCreatorEntity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    comic_creator::Column::ComicId,
                    comic_creator::Column::CreatorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    /// Creators credited on a comic, ordered by creator id
    pub async fn creators_of_comic<C>(db: &C, comic_id: i32) -> AppResult<Vec<Creator>>
    where
        C: ConnectionTrait,
    {
        let rows = ComicCreatorEntity::find()
            .filter(comic_creator::Column::ComicId.eq(comic_id))
            .order_by_asc(comic_creator::Column::CreatorId)
            .find_also_related(CreatorEntity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, creator)| creator.map(Creator::from))
            .collect())
    }
}

impl From<creator::Model> for Creator {
    fn from(m: creator::Model) -> Self {
        Self {
            id: m.creator_id,
            first_name: m.first_name,
            last_name: m.last_name,
            thumbnail_url: m.thumbnail_url,
        }
    }
}
