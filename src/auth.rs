use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

//////
// 共通鍵（HMAC）認証関係の実装

// JWTヘッダー
static JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// セッショントークンの有効期間（発行から24時間）
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// EncodingKey を作成（署名用）
pub fn create_encoding_key(secret: &str) -> EncodingKey {
    EncodingKey::from_secret(secret.as_bytes())
}

/// DecodingKey を作成（検証用）
pub fn create_decoding_key(secret: &str) -> DecodingKey {
    DecodingKey::from_secret(secret.as_bytes())
}

// JWTペイロード(クレーム)
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,   // User ID
    pub email: String, // ユーザーのメールアドレス
    pub iat: usize,    // issued at 発行日時
    pub exp: usize,    // 有効期限
}

/// セッショントークンの発行
/// 引数: &UserID, &メールアドレス, &秘密鍵
/// 戻り値: Result<JWT, AppError>
pub fn issue_session_token(user_id: &str, email: &str, secret: &str) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::hours(TOKEN_LIFETIME_HOURS);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let header = Header::new(JWT_ALGORITHM);
    let key = create_encoding_key(secret);
    encode(&header, &claims, &key).map_err(|e| AppError::EnvironmentError(e.to_string()))
}

/// セッショントークンの検証
/// 署名・有効期限のいずれかが不正なら一律で認証エラーを返す
/// （デコード失敗の詳細はクライアントに漏らさない）
pub fn verify_session_token(token: &str, key: &DecodingKey) -> Result<SessionClaims> {
    let validation = Validation::new(JWT_ALGORITHM);
    decode::<SessionClaims>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::AuthenticationError("Unauthorized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";

    #[test]
    fn issued_token_roundtrips() {
        let token = issue_session_token("user-1", "a@example.com", SECRET).unwrap();
        let key = create_decoding_key(SECRET);
        let claims = verify_session_token(&token, &key).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue_session_token("user-1", "a@example.com", SECRET).unwrap();
        let key = create_decoding_key("another-secret");
        assert!(verify_session_token(&token, &key).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // 発行時点で有効期限が2時間過去のトークンを直接組み立てる
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            email: "a@example.com".to_string(),
            iat: (now - Duration::hours(25)).timestamp() as usize,
            exp: (now - Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &create_encoding_key(SECRET),
        )
        .unwrap();

        let key = create_decoding_key(SECRET);
        assert!(verify_session_token(&token, &key).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let key = create_decoding_key(SECRET);
        assert!(verify_session_token("not.a.jwt", &key).is_err());
    }
}
