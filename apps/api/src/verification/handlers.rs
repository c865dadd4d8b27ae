use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::verification::award_badge;

#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    #[serde(alias = "quizId")]
    pub quiz_id: String,
    #[serde(alias = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub success: bool,
    pub awarded: bool,
    pub badges: Vec<String>,
}

/// POST /api/v1/verification
pub async fn handle_verification(
    State(state): State<AppState>,
    Json(req): Json<VerificationRequest>,
) -> Result<Json<VerificationResponse>, AppError> {
    let quiz_id = req.quiz_id.trim();
    if quiz_id.is_empty() {
        return Err(AppError::Validation("Quiz id is required".to_string()));
    }

    let award = award_badge(&state.db, req.user_id, quiz_id).await?;
    info!(
        "Verification for {}: quiz '{quiz_id}' (awarded: {})",
        req.user_id, award.awarded
    );

    Ok(Json(VerificationResponse {
        success: true,
        awarded: award.awarded,
        badges: award.badges,
    }))
}
