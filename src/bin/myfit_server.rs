// Server binary entry point
//
// Usage: cargo run --bin myfit_server
// PORT selects the listening port (default 5000), RUST_LOG the log filter.

use myfit_ai::config::{ServerConfig, DEFAULT_LOG_FILTER};
use myfit_ai::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MyFit server...");

    let config = ServerConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);

    // Fits the predictor once; handlers only read it
    let state = AppState::new()?;
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
