use std::net::SocketAddr;
use std::sync::Arc;

use linksaver::config::Config;
use linksaver::server::{AppState, start_server};
use linksaver::services::{AuthService, BookmarkService, SummaryService};
use linksaver::{auth, db};
use linksaver::repositories::{BookmarkRepository, UserRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    // DB接続はここで開き、シャットダウン時にここで閉じる
    let pool = db::connect(&config.database.connection_url).await?;
    db::init_schema(&pool).await?;

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let bookmark_repo = Arc::new(BookmarkRepository::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        config.jwt.secret.clone(),
    ));
    let summary_service = Arc::new(SummaryService::new(
        Arc::clone(&bookmark_repo),
        config.summary.endpoint.clone(),
    ));
    let bookmark_service = Arc::new(BookmarkService::new(
        Arc::clone(&bookmark_repo),
        summary_service,
    ));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        pool: pool.clone(),
        jwt_decoding_key: auth::create_decoding_key(&config.jwt.secret),
        auth_service,
        bookmark_service,
        config: Arc::new(config),
    };

    start_server(addr, state).await?;

    pool.close().await;
    Ok(())
}
