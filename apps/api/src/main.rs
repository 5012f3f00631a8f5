mod analysis;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file::FileStore;
use crate::store::KvStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IntelliCareer API v{}", env!("CARGO_PKG_VERSION"));

    // Local persistence: one JSON record per key under the data dir
    let kv: Arc<dyn KvStore> = Arc::new(FileStore::new(config.data_dir.clone()));
    info!("Local store at {}", config.data_dir.display());

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.provider_timeout);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Hydrate stores and build app state
    let state = AppState::new(llm, kv).await?;

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
