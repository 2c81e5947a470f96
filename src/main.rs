use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use marketpulse_backend::config::AppConfig;
use marketpulse_backend::logging::{init_logging, LoggingConfig};
use marketpulse_backend::services::llm_service::LlmService;
use marketpulse_backend::services::market_data_service::MarketDataService;
use marketpulse_backend::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env();

    let llm_service = Arc::new(LlmService::new(config.llm.clone()));
    let market_data = MarketDataService::new(config.simulated_latency);
    let state = AppState::new(market_data, llm_service);

    // Warm the dashboard so the first GET has data
    let warmup = state.dashboard.clone();
    tokio::spawn(async move {
        warmup.refresh().await;
    });

    let app = create_app(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Market Pulse backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
