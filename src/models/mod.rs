pub mod catalog;
pub mod collection;
pub mod comic;
pub mod creator;
pub mod user;

pub use catalog::*;
pub use collection::*;
pub use comic::*;
pub use creator::*;
pub use user::*;
