use crate::auth::issue_session_token;
use crate::error::{AppError, Result};
use crate::repositories::{SafeUser, UserHandler, UserRepository};
use std::sync::Arc;

// 適応型ハッシュのコストファクタ
const BCRYPT_COST: u32 = 10;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: Arc<UserRepository>, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    /// ユーザー登録
    /// 既存メールアドレスはConflict。成功時はトークンと安全なユーザー情報を返す
    pub async fn register(&self, email: String, password: String) -> Result<(String, SafeUser)> {
        validate_credentials(&email, &password)?;

        // メールアドレスの重複チェック（大文字小文字を区別した完全一致）
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = bcrypt::hash(&password, BCRYPT_COST)
            .map_err(|e| AppError::HashingError(e.to_string()))?;

        let user = self.user_repo.create(&email, &password_hash).await?;
        let token = issue_session_token(&user.id, &user.email, &self.jwt_secret)?;

        Ok((token, user))
    }

    /// ログイン処理
    /// 未知のメールアドレスとパスワード不一致は同一のエラーを返す（情報を漏らさない）
    pub async fn login(&self, email: String, password: String) -> Result<(String, SafeUser)> {
        validate_credentials(&email, &password)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        let verified = bcrypt::verify(&password, &user.password_hash)
            .map_err(|e| AppError::HashingError(e.to_string()))?;
        if !verified {
            return Err(invalid_credentials());
        }

        let token = issue_session_token(&user.user_id, &user.email, &self.jwt_secret)?;
        let safe_user = SafeUser {
            id: user.user_id,
            email: user.email,
        };

        Ok((token, safe_user))
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::ValidationError(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::AuthenticationError("Invalid credentials".to_string())
}
