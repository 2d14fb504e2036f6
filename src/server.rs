use axum::{
    Router,
    http::{Method, header},
};
use jsonwebtoken::DecodingKey;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::{create_api_routes, create_ui_routes};
use crate::services::{AuthService, BookmarkService};

/// アプリケーション全体で共有される状態
#[derive(Clone)]
pub struct AppState {
    // DB（mainで構築されて注入される。グローバルには持たない）
    pub pool: SqlitePool,
    pub jwt_decoding_key: DecodingKey,
    /// サービス層
    pub auth_service: Arc<AuthService>,
    pub bookmark_service: Arc<BookmarkService>,
    /// アプリケーション設定
    pub config: Arc<Config>,
}

pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let allowed_origins = state.config.server.get_allowed_origins(&addr)?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(vec![Method::GET, Method::POST, Method::DELETE])
        .allow_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", create_api_routes())
        .merge(create_ui_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
