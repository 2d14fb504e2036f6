use crate::error::{AppError, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// 接続プールを明示的に構築する（グローバルシングルトンは使わない）
/// プロセス起動時にopenし、シャットダウン時にmainがcloseする
pub async fn connect(connection_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(connection_url)
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// スキーマの初期化（冪等）
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            user_id       TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS bookmarks (
            bookmark_id TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            url         TEXT NOT NULL,
            title       TEXT NOT NULL,
            favicon     TEXT NOT NULL,
            summary     TEXT NOT NULL,
            status      TEXT NOT NULL,
            created_at  TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_bookmarks_user_created
         ON bookmarks (user_id, created_at)",
    )
    .execute(pool)
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(())
}
