use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comics")]
pub struct Model {
    /// Catalog-assigned id, never generated locally
    #[sea_orm(primary_key, auto_increment = false)]
    pub comic_id: i32,
    pub title: String,
    pub thumbnail_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comic_collection::Entity")]
    ComicCollections,
    #[sea_orm(has_many = "super::comic_creator::Entity")]
    ComicCreators,
}

impl Related<super::comic_collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicCollections.def()
    }
}

impl Related<super::comic_creator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicCreators.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
