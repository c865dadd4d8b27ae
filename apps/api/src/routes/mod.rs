pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::proposals::handlers as proposals;
use crate::state::AppState;
use crate::verification::handlers as verification;

/// Multipart framing and the job description on top of the resume itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_resume_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route(
            "/api/v1/resumes/upload",
            post(matching::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/resumes/analyze", post(matching::handle_analyze))
        .route("/api/v1/skills/expand", post(matching::handle_expand))
        // Candidate matching
        .route("/api/v1/match/rank", post(matching::handle_rank))
        .route("/api/v1/match", post(matching::handle_match))
        // Proposals and badges
        .route("/api/v1/proposals", post(proposals::handle_create_proposal))
        .route("/api/v1/verification", post(verification::handle_verification))
        .with_state(state)
}
