use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::analyzer::ResumeAnalyzer;
use crate::matching::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Catalog snapshot loaded at startup; read-only afterwards.
    pub engine: Arc<MatchEngine>,
    /// Pluggable resume analyzer. Default: KeywordResumeAnalyzer. Swap via RESUME_ANALYZER.
    pub resume_analyzer: Arc<dyn ResumeAnalyzer>,
}
