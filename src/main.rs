//! search-proxy: entry point of the HTTP service

use anyhow::Result;
use search_proxy::{
    config,
    engines::EngineLoader,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting search-proxy v{}", search_proxy::VERSION);

    // Load configuration
    let settings = config::load()?;
    if settings.server.api_key == config::DEFAULT_API_KEY {
        tracing::warn!("API_KEY is not set, using the development key");
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!(
        "HTTP client initialized ({} attempts per request)",
        client.retry_policy().max_attempts
    );

    // Load engines
    let registry = EngineLoader::load(&settings)?;

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, registry, client);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
