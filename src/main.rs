// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::reading_service::ReadingService;
use crate::application::reading_source::RawReadingSource;
use crate::infrastructure::config::{SourceKind, SourceSettings, load_service_config};
use crate::infrastructure::fixture_reading_source::FixtureReadingSource;
use crate::infrastructure::http_reading_source::HttpReadingSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, query_readings};

fn build_source(settings: &SourceSettings) -> anyhow::Result<Arc<dyn RawReadingSource>> {
    match settings.kind {
        SourceKind::Http => {
            let base_url = settings
                .base_url
                .clone()
                .context("source.base_url is required for the http source")?;
            Ok(Arc::new(HttpReadingSource::new(base_url, settings.token.clone())))
        }
        SourceKind::Fixture => {
            let path = settings
                .fixture_path
                .as_deref()
                .context("source.fixture_path is required for the fixture source")?;
            Ok(Arc::new(FixtureReadingSource::load(path)?))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_service_config()?;

    // Create source (infrastructure layer)
    let source = build_source(&config.source)?;

    // Create services (application layer)
    let profiles = config.profile_registry()?;
    tracing::info!("Registered {} field profile names", profiles.len());
    let reading_service = ReadingService::new(source, profiles);

    // Create application state
    let state = Arc::new(AppState { reading_service });

    // Build router (presentation layer)
    // Compression is negotiated per response in http_response, so no
    // CompressionLayer here.
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/readings", post(query_readings))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address))?;
    tracing::info!("Starting sensor-readings service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
