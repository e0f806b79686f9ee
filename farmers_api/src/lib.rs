//! Core library for the Local Farmers API: configuration, middleware pipeline and routes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::{ApiConfig, LogFormat};
pub use error::{AppError, Result};
pub use handlers::health::HealthReport;
pub use handlers::routes::create_routes;
pub use middleware::cors::cors_layer_from_config;
pub use middleware::json_body::JsonBody;

use axum::{middleware as axum_middleware, Router};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub version: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Instant::now(),
        }
    }
}

pub fn create_app(config: &ApiConfig) -> Router {
    build_app(config, create_routes())
}

/// Wraps `routes` in the not-found fallback and the middleware pipeline.
///
/// Layers run outermost first: security headers, CORS, request logging,
/// JSON body parsing, then panic recovery around the handlers.
pub fn build_app(config: &ApiConfig, routes: Router<AppState>) -> Router {
    let state = AppState::new(config.clone());

    let router = routes
        .fallback(handlers::routes::handle_not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(axum_middleware::from_fn_with_state(
            config.json_body_limit_bytes,
            middleware::json_body::parse_json_body,
        ));

    middleware::logging::with_request_logging(router)
        .layer(cors_layer_from_config(config))
        .layer(axum_middleware::from_fn(middleware::security::security_headers))
        .with_state(state)
}

/// Resolves `host:port` from the config, so `HOST` may be a name such as
/// `localhost` as well as an IP address. The first resolved address wins.
pub async fn resolve_bind_address(config: &ApiConfig) -> anyhow::Result<SocketAddr> {
    let bind_address = config.bind_address();

    let resolved = tokio::net::lookup_host(&bind_address)
        .await
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", bind_address, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Bind address {} resolved to nothing", bind_address));
    resolved
}

pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
