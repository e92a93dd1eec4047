//! Weather Ledger - Backend Server

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_ledger_backend::{
    config::{FALLBACK_API_KEY_ENV, GEMINI_API_KEY_ENV},
    create_app,
    external::GeminiClient,
    services::{LedgerController, WeatherOracle},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_ledger_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Weather Ledger Server");
    tracing::info!("Environment: {}", config.environment);

    if config.gemini.is_configured() {
        tracing::info!("Using model {}", config.gemini.model);
    } else {
        tracing::warn!(
            "No model API key configured ({} or {}); weather queries will fail",
            GEMINI_API_KEY_ENV,
            FALLBACK_API_KEY_ENV
        );
    }

    let model = GeminiClient::from_config(&config.gemini);
    let controller = LedgerController::new(WeatherOracle::new(Arc::new(model)));

    // Create application state
    let state = AppState {
        controller,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
