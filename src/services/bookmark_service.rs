use crate::error::{AppError, Result};
use crate::repositories::{Bookmark, BookmarkHandler, BookmarkRepository, BookmarkStatus};
use crate::services::metadata;
use crate::services::summary_service::{PLACEHOLDER_SUMMARY, SummaryService};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct BookmarkService {
    bookmark_repo: Arc<BookmarkRepository>,
    summary_service: Arc<SummaryService>,
}

impl BookmarkService {
    pub fn new(bookmark_repo: Arc<BookmarkRepository>, summary_service: Arc<SummaryService>) -> Self {
        Self {
            bookmark_repo,
            summary_service,
        }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Bookmark>> {
        self.bookmark_repo.find_by_user_id(user_id).await
    }

    /// ブックマーク作成
    /// タイトルとfaviconは同期的に導出し、要約は切り離したタスクで後から確定する
    /// レスポンスは status=processing とプレースホルダー要約を持つ
    pub async fn create(&self, user_id: &str, url: String) -> Result<Bookmark> {
        if url.trim().is_empty() {
            return Err(AppError::ValidationError("URL is required".to_string()));
        }

        let meta = metadata::resolve(&url);
        let bookmark = Bookmark {
            bookmark_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            url,
            title: meta.title,
            favicon: meta.favicon,
            summary: PLACEHOLDER_SUMMARY.to_string(),
            status: BookmarkStatus::Processing,
            created_at: Utc::now(),
        };

        let created = self.bookmark_repo.create(bookmark).await?;

        self.summary_service
            .spawn(created.bookmark_id.clone(), created.url.clone());

        Ok(created)
    }

    /// 所有者によるハードデリート
    /// 対象が存在しないか他ユーザー所有の場合はNotFound
    pub async fn delete(&self, user_id: &str, bookmark_id: &str) -> Result<()> {
        let deleted = self.bookmark_repo.delete_owned(user_id, bookmark_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }
}
