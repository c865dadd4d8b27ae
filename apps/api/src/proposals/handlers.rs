use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::proposals::{draft_proposal, ProposalDraft, ProposalJob};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    #[serde(default)]
    pub job: Option<ProposalJob>,
}

#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub proposal: ProposalDraft,
}

/// POST /api/v1/proposals
pub async fn handle_create_proposal(
    State(state): State<AppState>,
    Json(req): Json<ProposalRequest>,
) -> Result<Json<ProposalResponse>, AppError> {
    let job = req
        .job
        .filter(|job| !job.title.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job data missing".to_string()))?;

    let proposal = draft_proposal(&state.llm, &job).await?;
    info!("Proposal drafted for '{}'", job.title.trim());
    Ok(Json(ProposalResponse { proposal }))
}
