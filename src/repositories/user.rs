use crate::error::{AppError, Result};
use serde::Serialize;

pub struct UserRepository {
    pub pool: sqlx::SqlitePool,
}

impl UserRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

/////////
/// User
/////////
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// クライアントに返してよいユーザー情報（パスワードハッシュは含めない）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SafeUser {
    #[sqlx(rename = "user_id")]
    pub id: String,
    pub email: String,
}

#[async_trait::async_trait]
pub trait UserHandler: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, email: &str, password_hash: &str) -> Result<SafeUser>;
}

#[async_trait::async_trait]
impl UserHandler for UserRepository {
    // メールアドレスは大文字小文字を区別して完全一致で照合する
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<SafeUser> {
        let user_id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now();

        sqlx::query(
            "INSERT INTO users (user_id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user_id)
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(SafeUser {
            id: user_id,
            email: email.to_string(),
        })
    }
}
