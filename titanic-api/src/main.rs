//! titanic-api service entry point.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use titanic_api::{build_router, AppState, Dataset};
use titanic_common::config::Config;
use titanic_common::logging::init_logging;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<()> {
    let startup_start = std::time::Instant::now();

    let config = Config::load()?;
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Titanic Q&A API v{}", env!("CARGO_PKG_VERSION"));

    // Load the dataset once; a missing or empty file aborts startup.
    let dataset = match Dataset::load(&config.data.path) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            tracing::error!(error = %e, path = %config.data.path.display(), "Cannot start without dataset");
            return Err(e.into());
        }
    };

    let state = AppState::new(dataset);

    // Build router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;

    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
