use std::sync::Arc;

use anyhow::Context;

use shopadvisor_api::app::{self, services};
use shopadvisor_infra::{AppConfig, ServiceMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("pretty") => shopadvisor_observability::init_pretty(),
        _ => shopadvisor_observability::init(),
    }

    let config = AppConfig::from_env();
    if config.mode == ServiceMode::Live && config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; advice will use templated text");
    }

    let services = Arc::new(services::build_services(&config));
    services::spawn_warmup(Arc::clone(&services));

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(mode = config.mode.as_str(), "listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
