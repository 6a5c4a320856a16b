mod auth;
mod config;
mod dispatch;
mod errors;
mod forwarder;
mod instrument;
mod models;
mod prompt;
mod providers;
mod routes;
mod settings;
mod state;
mod templates;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::forwarder::LyzrClient;
use crate::instrument::{ApiCallLog, UsageMetrics};
use crate::routes::build_router;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireWrite API v{}", env!("CARGO_PKG_VERSION"));

    // Instrumentation stores shared by the dispatcher and the read endpoints
    let call_log = Arc::new(ApiCallLog::new());
    let metrics = Arc::new(UsageMetrics::new());

    // Agent platform client for the function routes
    let lyzr = LyzrClient::new(
        config.lyzr_api_url.clone(),
        config.lyzr_api_key.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    );
    info!("Agent platform client initialized ({})", config.lyzr_api_url);

    // Dispatcher behind the editor-facing generation endpoints
    let mut dispatcher = Dispatcher::new(
        &config.forwarder_base_url,
        config.service_auth_token.clone(),
        Arc::clone(&call_log),
        Arc::clone(&metrics),
    );
    if let Some(secs) = config.dispatch_timeout_secs {
        dispatcher = dispatcher.with_timeout(Duration::from_secs(secs));
        info!("Dispatch timeout enabled: {secs}s");
    }
    info!("Dispatcher targets {}", config.forwarder_base_url);

    // Client settings store
    let settings = Arc::new(SettingsStore::open(config.settings_path.clone())?);

    // Build app state
    let state = AppState {
        config: config.clone(),
        lyzr,
        dispatcher: Arc::new(dispatcher),
        call_log,
        metrics,
        settings,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
