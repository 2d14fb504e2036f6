use axum::{Router, response::Html, routing::get};

use crate::server::AppState;
use crate::templates;

pub fn create_ui_routes() -> Router<AppState> {
    Router::new().route("/", get(handle_index))
}

async fn handle_index() -> Html<String> {
    Html(templates::render_app())
}
