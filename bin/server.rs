// Receipt Processor - Web Server
// Scores receipts over HTTP and keeps the points in memory

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use receipt_processor::api::{create_router, AppState};
use receipt_processor::{InMemoryStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // Fresh store per process; nothing survives a restart
    let state = AppState::new(Arc::new(InMemoryStore::new()));
    let app = create_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("🚀 Receipt processor listening on http://{}", addr);
    info!("   POST http://{}/receipts/process", addr);
    info!("   GET  http://{}/receipts/{{id}}/points", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
