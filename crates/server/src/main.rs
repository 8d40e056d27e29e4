//! liftoff server entry point.
//!
//! Loads configuration, starts the periodic fetch, and serves the HTTP API
//! until Ctrl-C.

use anyhow::{Context, Result};
use liftoff_client::Fetcher;
use liftoff_core::{AppConfig, SharedState};
use liftoff_server::{AppState, create_app, scheduler};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(config.log_json);

    let state = SharedState::new();
    let fetcher = Fetcher::from_app_config(&config, state).context("building news API client")?;

    tracing::info!(
        base_query = %config.base_query,
        interval_secs = config.fetch_interval_secs,
        max_retries = config.max_retries,
        "Starting liftoff"
    );

    let refresher = scheduler::spawn(fetcher.clone(), config.fetch_interval());

    let app = create_app(AppState::new(fetcher), &config.static_dir);
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    refresher.abort();
    tracing::info!("liftoff stopped");

    Ok(())
}
