pub mod auth;
pub mod collection;
pub mod comic;
pub mod common;
pub mod user;

pub use auth::{login, me, register, AuthResponse, LoginRequest, RegisterRequest};
pub use collection::{
    create_collection, delete_collection, get_collection, get_collection_owner,
    get_collection_thumbnail, list_collections, list_my_collections, list_user_collections,
    CollectionListResponse, CollectionResponse, CreateCollectionRequest, OwnerResponse,
    ThumbnailResponse,
};
pub use comic::{add_comic, remove_comic};
pub use common::{validate_required, SearchParams};
pub use user::{get_user, get_user_id_by_username, UserIdResponse};
