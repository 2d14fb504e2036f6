use axum::Router;
use axum::http::{HeaderMap, header};

use crate::auth::{SessionClaims, verify_session_token};
use crate::error::{AppError, Result};
use crate::server::AppState;

mod auth;
mod bookmarks;

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::create_auth_routes())
        .merge(bookmarks::create_bookmark_routes())
}

/// Authorization: Bearer ヘッダーからセッションを検証する
/// ヘッダー欠落・形式不正・署名不正・期限切れはいずれも401
pub(crate) fn require_session(state: &AppState, headers: &HeaderMap) -> Result<SessionClaims> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthenticationError("Authentication required".to_string()))?;

    verify_session_token(token, &state.jwt_decoding_key)
}
