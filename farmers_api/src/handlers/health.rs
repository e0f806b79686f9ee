//! Health router mounted at `/health`

use crate::{handlers::routes::handle_not_found, AppState};
use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const STATUS_OK: &str = "ok";

/// Body of `GET /health`. Clients rely on `status` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn ok(version: impl Into<String>, uptime_seconds: u64) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            version: version.into(),
            uptime_seconds,
            timestamp: Utc::now(),
        }
    }
}

pub fn health_router() -> Router<AppState> {
    Router::new().route("/", get(handle_health).fallback(handle_not_found))
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthReport> {
    let uptime_seconds = state.started_at.elapsed().as_secs();
    debug!(uptime_seconds, "GET /health");

    Json(HealthReport::ok(state.version.clone(), uptime_seconds))
}
