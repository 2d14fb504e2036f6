pub mod api;
pub mod ui;

pub use api::create_api_routes;
pub use ui::create_ui_routes;
