use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::contact::extract_contact;
use crate::matching::ranker::{Candidate, JobRequirements, RankedCandidate};
use crate::matching::role_expansion::Requirement;
use crate::matching::skill_match::MatchResult;
use crate::matching::upload::{extract_resume_text, read_upload_form};
use crate::models::job::JobRow;
use crate::models::profile::{Profile, ProfileRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
}

impl AnalyzeRequest {
    /// An explicit skill list wins over free text.
    fn requirement(&self) -> Result<Requirement, AppError> {
        if let Some(skills) = &self.required_skills {
            let requirement = Requirement::Skills(skills.clone());
            if !requirement.is_blank() {
                return Ok(requirement);
            }
        }
        match &self.job_description {
            Some(text) if !text.trim().is_empty() => Ok(Requirement::Text(text.clone())),
            _ => Err(AppError::Validation(
                "Job description is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub requirement: Requirement,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub required_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job: JobRequirements,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranked: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_id: Uuid,
}

/// A stored profile with its ranking for one job.
#[derive(Debug, Serialize)]
pub struct ProfileMatch {
    #[serde(flatten)]
    pub profile: Profile,
    pub rank: usize,
    pub score: u32,
    pub skill_overlap_count: usize,
    pub availability_match: bool,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job: JobRow,
    pub matches: Vec<ProfileMatch>,
}

/// POST /api/v1/resumes/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let form = read_upload_form(multipart, state.config.max_resume_bytes).await?;
    let resume_text = extract_resume_text(&form.resume).await?;
    debug!(
        "Extracted {} chars from '{}'",
        resume_text.chars().count(),
        form.resume.file_name.as_deref().unwrap_or("resume")
    );

    let mut result = state
        .resume_analyzer
        .analyze(&resume_text, &Requirement::Text(form.job_description))
        .await?;
    result.contact = Some(extract_contact(&resume_text));

    info!(
        "Resume analyzed by {} backend: score {}",
        state.resume_analyzer.backend(),
        result.score
    );
    Ok(Json(result))
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }
    let requirement = req.requirement()?;

    let result = state
        .resume_analyzer
        .analyze(&req.resume_text, &requirement)
        .await?;
    info!(
        "Resume text analyzed by {} backend: score {}",
        state.resume_analyzer.backend(),
        result.score
    );
    Ok(Json(result))
}

/// POST /api/v1/skills/expand
pub async fn handle_expand(
    State(state): State<AppState>,
    Json(req): Json<ExpandRequest>,
) -> Result<Json<ExpandResponse>, AppError> {
    if req.requirement.is_blank() {
        return Err(AppError::Validation("Requirement is required".to_string()));
    }
    let required_skills = state.engine.expand(&req.requirement);
    debug!("Requirement expanded to {} skills", required_skills.len());
    Ok(Json(ExpandResponse { required_skills }))
}

/// POST /api/v1/match/rank
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let ranked = state.engine.rank(&req.job, &req.candidates);
    debug!("Ranked {} candidates", ranked.len());
    Ok(Json(RankResponse { ranked }))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let job = JobRow::fetch(&state.db, req.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let profiles: Vec<Profile> = ProfileRow::fetch_all(&state.db)
        .await?
        .into_iter()
        .map(Profile::from)
        .collect();
    let candidates: Vec<Candidate> = profiles.iter().map(Profile::to_candidate).collect();

    let ranked = state.engine.rank(&job.requirements(), &candidates);
    let matches = join_profiles(profiles, ranked);

    info!("Matched {} profiles against job {}", matches.len(), job.id);
    Ok(Json(MatchResponse { job, matches }))
}

/// Re-attaches profile details to ranking output, keeping ranked order.
fn join_profiles(profiles: Vec<Profile>, ranked: Vec<RankedCandidate>) -> Vec<ProfileMatch> {
    let mut by_id: HashMap<String, Profile> = profiles
        .into_iter()
        .map(|profile| (profile.id.to_string(), profile))
        .collect();

    ranked
        .into_iter()
        .filter_map(|r| {
            by_id.remove(&r.candidate_id).map(|profile| ProfileMatch {
                profile,
                rank: r.rank,
                score: r.score,
                skill_overlap_count: r.skill_overlap_count,
                availability_match: r.availability_match,
            })
        })
        .collect()
}
