use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ブックマークの処理状態
/// processing -> completed | failed の一方向にのみ遷移する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookmarkStatus {
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub bookmark_id: String,
    pub user_id: String,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
    pub status: BookmarkStatus,
    pub created_at: DateTime<Utc>,
}

pub struct BookmarkRepository {
    pub pool: sqlx::SqlitePool,
}

impl BookmarkRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
pub trait BookmarkHandler: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Bookmark>>;
    async fn create(&self, bookmark: Bookmark) -> Result<Bookmark>;
    async fn update_summary(
        &self,
        bookmark_id: &str,
        summary: &str,
        status: BookmarkStatus,
    ) -> Result<bool>;
    async fn delete_owned(&self, user_id: &str, bookmark_id: &str) -> Result<bool>;
}

#[async_trait::async_trait]
impl BookmarkHandler for BookmarkRepository {
    /// 所有ユーザーのブックマークを作成日時の降順で返す
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Bookmark>> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT bookmark_id, user_id, url, title, favicon, summary, status, created_at
             FROM bookmarks WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(bookmarks)
    }

    async fn create(&self, bookmark: Bookmark) -> Result<Bookmark> {
        sqlx::query(
            "INSERT INTO bookmarks
             (bookmark_id, user_id, url, title, favicon, summary, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&bookmark.bookmark_id)
        .bind(&bookmark.user_id)
        .bind(&bookmark.url)
        .bind(&bookmark.title)
        .bind(&bookmark.favicon)
        .bind(&bookmark.summary)
        .bind(bookmark.status)
        .bind(bookmark.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(bookmark)
    }

    /// 要約の確定
    /// processing のままの行だけを遷移させる条件付き更新
    /// 戻り値は行が実際に遷移したかどうか
    async fn update_summary(
        &self,
        bookmark_id: &str,
        summary: &str,
        status: BookmarkStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE bookmarks SET summary = ?, status = ?
             WHERE bookmark_id = ? AND status = ?",
        )
        .bind(summary)
        .bind(status)
        .bind(bookmark_id)
        .bind(BookmarkStatus::Processing)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// 所有チェックと削除を単一ステートメントで行う
    /// 他ユーザーのブックマークは削除されない
    async fn delete_owned(&self, user_id: &str, bookmark_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE bookmark_id = ? AND user_id = ?")
            .bind(bookmark_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
