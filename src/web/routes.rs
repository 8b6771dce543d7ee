use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use super::handlers;
use super::static_files::static_handler;
use super::state::AppState;

// UI Routes - web interface
pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::ui::index_handler).post(handlers::ui::ask_handler))
        .route("/static/{*path}", get(static_handler))
}

// API Routes - REST API for programmatic access
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/ask", post(handlers::api::ask))
            .route("/tables", get(handlers::api::list_tables))
            .route("/status", get(handlers::api::system_status)),
    )
}
