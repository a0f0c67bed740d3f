//! TradeDesk API: parses operator intent text and forwards validated
//! intents to the trading backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use td_api::backend::HttpBackend;
use td_api::config::ApiConfig;
use td_api::routes::build_router_with_cors;
use td_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "td-api starting");

    let config = ApiConfig::load()?;

    let state = match &config.backend {
        Some(backend) => {
            let client = HttpBackend::new(backend)?;
            tracing::info!(endpoint = %client.endpoint(), "forwarding intents to backend");
            AppState::with_backend(Arc::new(client))
        }
        None => {
            tracing::warn!("no backend configured, intents are recorded but not forwarded");
            AppState::new()
        }
    };

    let app = build_router_with_cors(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
