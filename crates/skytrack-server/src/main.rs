//! SkyTrack Server - polls OpenSky for one aircraft and feeds a live dashboard

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skytrack_opensky::OpenSkyClient;
use skytrack_server::api;
use skytrack_server::clock::{SystemClock, TokioSleeper};
use skytrack_server::config::Config;
use skytrack_server::provider::OpenSkyProvider;
use skytrack_server::state::{DashboardSink, DashboardStore};
use skytrack_server::{PollCycle, PollLoop};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("skytrack_server=debug".parse()?))
        .init();

    tracing::info!("Starting SkyTrack Server...");

    let config = Config::from_env();
    let reference = config
        .reference_point()
        .context("Invalid reference point")?;

    let mut client = OpenSkyClient::new(config.opensky_url.clone(), config.opensky_timeout)?;
    if let Some(username) = config.opensky_username.clone() {
        client = client.with_credentials(username, config.opensky_password.clone().unwrap_or_default());
    }
    tracing::info!("Polling OpenSky at {}", client.base_url());
    let mut provider = OpenSkyProvider::new(client);
    if config.filter_target {
        provider = provider.with_icao24_filter(config.target_icao24.clone());
    }

    let store = Arc::new(DashboardStore::from_config(&config));

    // Dashboard feed
    let app = api::routes()
        .with_state(store.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Dashboard listening on {}", addr);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("Dashboard server stopped: {}", err);
        }
    });

    tracing::info!(
        "Reference point ({}, {})",
        reference.lat(),
        reference.lon()
    );

    // Tracking loop runs on this task until the process is killed.
    let cycle = PollCycle::new(
        provider,
        DashboardSink::new(store),
        SystemClock,
        config.target_icao24.clone(),
        reference,
    );
    let mut poll_loop = PollLoop::new(cycle, config.retry_policy(), TokioSleeper);
    poll_loop.run().await;

    Ok(())
}
