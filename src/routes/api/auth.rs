use axum::{Router, extract::State, response::Json, routing::post};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::repositories::SafeUser;
use crate::server::AppState;

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
}

//// データ構造定義
#[derive(Deserialize)]
struct CredentialRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct AuthResponse {
    success: bool,
    token: String,
    user: SafeUser,
}

//// ハンドラ関数
async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<AuthResponse>> {
    let (token, user) = state.auth_service.register(req.email, req.password).await?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<AuthResponse>> {
    let (token, user) = state.auth_service.login(req.email, req.password).await?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}
