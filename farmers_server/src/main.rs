//! Main entry point for the Local Farmers API server binary

use anyhow::Result;
use farmers_api::{create_app, resolve_bind_address, run_server, ApiConfig, LogFormat};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ApiConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_tracing(config.log_format);

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!(origins = ?config.cors_origins, "CORS allow-list");

    let addr = resolve_bind_address(&config).await?;

    let app = create_app(&config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

        format!(
            "farmers_api={default_level},farmers_server={default_level},tower_http=debug"
        )
        .into()
    });

    let fmt_layer = fmt::layer().with_target(true);

    match log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init(),
    }
}
