use std::sync::Arc;

use anyhow::Context;
use post_api::{AppState, Config, build_router, store::MemoryPostStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .compact()
        .init();

    let state = AppState::new(Arc::new(MemoryPostStore::new()), &config);
    let app = build_router(state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health           - Health check");
    info!("  GET    /posts            - List posts (cursor paginated)");
    info!("  POST   /posts            - Create post");
    info!("  GET    /posts/{{id}}       - Get specific post");
    info!("  PATCH  /posts/{{id}}       - Update post");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
