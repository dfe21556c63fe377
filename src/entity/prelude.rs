pub use super::collection::Entity as Collection;
pub use super::comic::Entity as Comic;
pub use super::comic_collection::Entity as ComicCollection;
pub use super::comic_creator::Entity as ComicCreator;
pub use super::creator::Entity as Creator;
pub use super::user::Entity as User;
