//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::ApiConfig;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

const WILDCARD_ORIGIN: &str = "*";

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the allow-list layer. Origins that fail header parsing are skipped;
/// `ApiConfig::validate` rejects them before this is reached.
///
/// A `*` entry is an exact-match origin that no browser sends, so it allows
/// nothing and is left out of the list.
pub fn cors_layer_from_config(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter(|origin| {
            let wildcard = origin.as_str() == WILDCARD_ORIGIN;
            if wildcard {
                warn!("Ignoring `*` in CORS_ORIGINS; list the allowed origins explicitly");
            }
            !wildcard
        })
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
}
