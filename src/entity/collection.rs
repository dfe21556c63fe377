use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub collection_id: i32,
    pub user_id: i32,
    pub collection_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comic_collection::Entity")]
    ComicCollections,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comic_collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicCollections.def()
    }
}

impl Related<super::comic::Entity> for Entity {
    fn to() -> RelationDef {
        super::comic_collection::Relation::Comic.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::comic_collection::Relation::Collection.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
