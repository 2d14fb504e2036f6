mod auth_service;
mod bookmark_service;
pub mod metadata;
mod summary_service;

pub use auth_service::AuthService;
pub use bookmark_service::BookmarkService;
pub use summary_service::{
    EMPTY_SUMMARY, FAILED_SUMMARY, PLACEHOLDER_SUMMARY, SummaryService, derive_summary,
};
