pub mod bookmark;
pub mod user;

pub use bookmark::{Bookmark, BookmarkHandler, BookmarkRepository, BookmarkStatus};
pub use user::{SafeUser, User, UserHandler, UserRepository};
