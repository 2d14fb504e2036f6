use std::sync::Arc;

use linksaver::auth::{create_decoding_key, verify_session_token};
use linksaver::error::AppError;
use linksaver::repositories::UserRepository;
use linksaver::services::AuthService;

mod common;

const SECRET: &str = "integration-test-secret";

async fn auth_service(pool: &sqlx::SqlitePool) -> AuthService {
    AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        SECRET.to_string(),
    )
}

#[tokio::test]
async fn register_returns_verifiable_token_and_safe_user() {
    let pool = common::test_pool().await;
    let service = auth_service(&pool).await;

    let (token, user) = service
        .register("alice@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");

    let key = create_decoding_key(SECRET);
    let claims = verify_session_token(&token, &key).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "alice@example.com");
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict_without_duplicate_row() {
    let pool = common::test_pool().await;
    let service = auth_service(&pool).await;

    service
        .register("alice@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap();

    let err = service
        .register("alice@example.com".to_string(), "different".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("alice@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let pool = common::test_pool().await;
    let service = auth_service(&pool).await;

    service
        .register("alice@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap();

    let wrong_password = service
        .login("alice@example.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();
    let unknown_email = service
        .login("nobody@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap_err();

    // 未知のメールアドレスとパスワード不一致で同一のエラーを返すこと
    assert!(matches!(wrong_password, AppError::AuthenticationError(_)));
    assert!(matches!(unknown_email, AppError::AuthenticationError(_)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let pool = common::test_pool().await;
    let service = auth_service(&pool).await;

    let (_, registered) = service
        .register("alice@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap();

    let (token, user) = service
        .login("alice@example.com".to_string(), "hunter22".to_string())
        .await
        .unwrap();

    assert_eq!(user.id, registered.id);
    let key = create_decoding_key(SECRET);
    assert!(verify_session_token(&token, &key).is_ok());
}

#[tokio::test]
async fn empty_credentials_are_rejected_as_validation_error() {
    let pool = common::test_pool().await;
    let service = auth_service(&pool).await;

    let err = service
        .register("".to_string(), "hunter22".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
