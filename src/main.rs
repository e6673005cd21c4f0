use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod web;

use api::thingspeak::FeedClient;
use config::DashboardConfig;
use web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("envdash=debug".parse()?)
            .add_directive("hyper=warn".parse()?))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🌫️  Starting envdash - Live Environmental Data Dashboard");

    let config = DashboardConfig::from_env();
    info!("Feed endpoint: {} (results={})", config.endpoint, config.results);
    info!("Refresh interval: {}s", config.interval().as_secs());

    let addr = config
        .bind_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    let state = Arc::new(AppState {
        client: FeedClient::with_endpoint(config.endpoint.clone()),
        config,
    });
    let app = web::build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
