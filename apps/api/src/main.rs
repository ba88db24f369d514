mod ai;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;
mod study;
mod tutor;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::{AiClient, CredentialStore, GeminiEndpoint};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LearnMate API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = db::connect(&config.database_url).await?;

    // Per-user credential store, with the optional service-wide default key
    let credentials = CredentialStore::new(db.clone(), config.gemini_api_key.clone());
    if config.gemini_api_key.is_some() {
        info!("Service-wide Gemini key configured as a default for users without their own");
    } else {
        info!("No service-wide Gemini key; users must store their own");
    }

    // Initialize the AI client
    let ai = AiClient::new(Arc::new(GeminiEndpoint::new(config.gemini_model.clone())));
    info!("AI client initialized (model: {})", config.gemini_model);

    // Build app state
    let state = AppState {
        db,
        ai,
        credentials,
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
