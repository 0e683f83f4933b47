// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{Router, routing::{get, post}};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::awdb_repository::AwdbRepository;
use crate::infrastructure::config::load_app_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, invoke_tool, list_tools};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snotel_tools=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(AwdbRepository::new(&config.awdb)?);

    // Create services (application layer)
    let state = Arc::new(AppState::new(repository));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(invoke_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr '{}'", config.server.bind_addr))?;
    tracing::info!("Starting snotel-tools on {} (AWDB at {})", addr, config.awdb.base_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
