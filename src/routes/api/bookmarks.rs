use axum::{
    Router,
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::repositories::Bookmark;
use crate::routes::api::require_session;
use crate::server::AppState;

pub fn create_bookmark_routes() -> Router<AppState> {
    Router::new().route(
        "/bookmarks",
        get(handle_list_bookmarks)
            .post(handle_create_bookmark)
            .delete(handle_delete_bookmark),
    )
}

//// データ構造定義
#[derive(Deserialize)]
struct BookmarkCreateRequest {
    url: String,
}

#[derive(Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

//// ハンドラ関数
async fn handle_list_bookmarks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Bookmark>>> {
    let claims = require_session(&state, &headers)?;

    let bookmarks = state.bookmark_service.list(&claims.sub).await?;
    Ok(Json(bookmarks))
}

// メタデータと要約の導出はサーバー側が唯一の実装
// クライアントはURLだけを送る
async fn handle_create_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BookmarkCreateRequest>,
) -> Result<Json<Bookmark>> {
    let claims = require_session(&state, &headers)?;

    let bookmark = state.bookmark_service.create(&claims.sub, req.url).await?;
    Ok(Json(bookmark))
}

async fn handle_delete_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>> {
    let claims = require_session(&state, &headers)?;

    let id = params
        .id
        .ok_or_else(|| AppError::ValidationError("ID required".to_string()))?;

    state.bookmark_service.delete(&claims.sub, &id).await?;
    Ok(Json(json!({ "success": true })))
}
