//! Terminal front end: renders the landing page and keeps the API status current

use anyhow::Result;
use farmers_web::{view, ClientConfig, HealthClient, PendingCheck, StatusPoller};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ClientConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    info!(api_base = %config.api_base(), "Configuration loaded");

    let client = HealthClient::new(&config)?;
    let poller = StatusPoller::mount(client);
    let mut updates = poller.subscribe();

    println!("{}", view::render_page(&poller.status(), poller.api_base()));
    println!("\nCommands: r = refresh status, q = quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_refresh: Option<PendingCheck> = None;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = updates.borrow_and_update().clone();
                println!("\n{}", view::render_status_card(&status, poller.api_base()));
            }
            line = lines.next_line() => {
                match line?.as_deref().map(str::trim) {
                    Some("r") | Some("refresh") => {
                        if poller.can_refresh() {
                            last_refresh = Some(poller.refresh());
                        } else {
                            debug!("Refresh ignored while a check is loading");
                        }
                    }
                    Some("q") | Some("quit") | None => break,
                    Some("") => {}
                    Some(other) => println!("Unknown command: {other}"),
                }
            }
        }
    }

    poller.unmount();
    if let Some(check) = last_refresh {
        check.finished().await;
    }
    info!("Status poller unmounted");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "farmers_web=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
