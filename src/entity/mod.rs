pub mod collection;
pub mod comic;
pub mod comic_collection;
pub mod comic_creator;
pub mod creator;
pub mod user;

pub mod prelude;

pub use prelude::*;
