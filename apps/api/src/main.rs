mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod proposals;
mod routes;
mod state;
mod verification;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AnalyzerBackend, Config};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::analyzer::{KeywordResumeAnalyzer, LlmResumeAnalyzer, ResumeAnalyzer};
use crate::matching::MatchEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GigMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Load skill catalog and role map
    let engine = Arc::new(load_engine(&config)?);
    info!(
        "Match engine ready: {} skills, {} roles",
        engine.catalog().len(),
        engine.roles().len()
    );
    debug!(
        "Catalog skills: {}",
        engine.catalog().skills().collect::<Vec<_>>().join(", ")
    );
    if engine.catalog().is_empty() && engine.roles().is_empty() {
        warn!("Skill catalog and role map are empty; free-text requirements will expand to nothing");
    }

    // Initialize resume analyzer (keyword by default, swap via RESUME_ANALYZER)
    let resume_analyzer: Arc<dyn ResumeAnalyzer> = match config.resume_analyzer {
        AnalyzerBackend::Keyword => Arc::new(KeywordResumeAnalyzer::new(engine.clone())),
        AnalyzerBackend::Llm => Arc::new(LlmResumeAnalyzer::new(llm.clone())),
    };
    info!("Resume analyzer backend: {}", resume_analyzer.backend());

    // Build app state
    let state = AppState {
        db,
        llm,
        config: config.clone(),
        engine,
        resume_analyzer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_engine(config: &Config) -> Result<MatchEngine> {
    match &config.skill_catalog_path {
        Some(path) => {
            info!("Loading skill catalog from {}", path.display());
            MatchEngine::from_file(path)
                .with_context(|| format!("Failed to load skill catalog '{}'", path.display()))
        }
        None => MatchEngine::with_defaults().context("Built-in skill catalog is invalid"),
    }
}
