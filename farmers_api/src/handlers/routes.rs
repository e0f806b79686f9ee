//! Top-level routes and the not-found fallback

use crate::{error::AppError, handlers::health::health_router, AppState};
use axum::{http::Uri, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

pub const GREETING: &str = "Local Farmers API";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root).fallback(handle_not_found))
        .nest("/health", health_router())
}

async fn handle_root() -> impl IntoResponse {
    Json(json!({ "message": GREETING }))
}

/// Answers unmatched paths, and known paths hit with an unsupported method, with 404.
pub async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
