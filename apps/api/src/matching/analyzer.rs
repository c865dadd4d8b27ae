//! Resume analysis backends behind a pluggable trait.
//!
//! Default: `KeywordResumeAnalyzer` (the deterministic matching core).
//! Alternative: `LlmResumeAnalyzer` (generative model). An AI backend never
//! surfaces upstream failure to the caller; unusable output degrades to an
//! empty but well-formed `MatchResult`.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::UNTRUSTED_INPUT_INSTRUCTION;
use crate::llm_client::{LlmClient, Structured};
use crate::matching::prompts::{RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_SYSTEM};
use crate::matching::role_expansion::Requirement;
use crate::matching::skill_match::{MatchResult, KEYWORD_BACKEND, LLM_BACKEND};
use crate::matching::text::normalize_skill_list;
use crate::matching::MatchEngine;

/// Implement this to swap analysis backends without touching handlers.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        requirement: &Requirement,
    ) -> Result<MatchResult, AppError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordResumeAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct KeywordResumeAnalyzer {
    engine: Arc<MatchEngine>,
}

impl KeywordResumeAnalyzer {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ResumeAnalyzer for KeywordResumeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        requirement: &Requirement,
    ) -> Result<MatchResult, AppError> {
        Ok(self.engine.analyze(resume_text, requirement))
    }

    fn backend(&self) -> &'static str {
        KEYWORD_BACKEND
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmResumeAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmResumeAnalyzer {
    llm: LlmClient,
}

impl LlmResumeAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Shape requested from the model. Every field is optional on the way in.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LlmAnalysis {
    score: f64,
    found_skills: Vec<String>,
    missing_skills: Vec<String>,
    strengths: Vec<String>,
    improvement_suggestions: Vec<String>,
}

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        requirement: &Requirement,
    ) -> Result<MatchResult, AppError> {
        let prompt = build_prompt(resume_text, requirement);

        let result = match self
            .llm
            .call_structured::<LlmAnalysis>(&prompt, RESUME_ANALYSIS_SYSTEM)
            .await
        {
            Ok(Structured::Parsed(analysis)) => {
                debug!("LLM analysis parsed (score {})", analysis.score);
                sanitize(analysis)
            }
            Ok(Structured::Unparsed(raw)) => {
                warn!("LLM analysis was not valid JSON, returning degenerate result");
                MatchResult::unparsed(raw)
            }
            Err(e) => {
                warn!("LLM analysis failed, returning degenerate result: {e}");
                MatchResult::unparsed(e.to_string())
            }
        };

        Ok(result)
    }

    fn backend(&self) -> &'static str {
        LLM_BACKEND
    }
}

fn build_prompt(resume_text: &str, requirement: &Requirement) -> String {
    let requirement_text = match requirement {
        Requirement::Text(text) => text.clone(),
        Requirement::Skills(skills) => format!("Required skills: {}", skills.join(", ")),
    };
    RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{untrusted}", UNTRUSTED_INPUT_INSTRUCTION)
        .replace("{requirement}", &requirement_text)
        .replace("{resume_text}", resume_text)
}

/// Forces model output back inside the `MatchResult` invariants.
fn sanitize(analysis: LlmAnalysis) -> MatchResult {
    let score = if analysis.score.is_finite() {
        analysis.score.clamp(0.0, 100.0).round() as u32
    } else {
        0
    };

    let found = normalize_skill_list(&analysis.found_skills);
    let missing: Vec<String> = normalize_skill_list(&analysis.missing_skills)
        .into_iter()
        .filter(|skill| !found.contains(skill))
        .collect();
    let required: Vec<String> = found.iter().chain(missing.iter()).cloned().collect();

    MatchResult {
        score,
        match_percentage: score,
        required_skills: required,
        found_skills: found,
        missing_skills: missing,
        detected_skills: Vec::new(),
        strengths: analysis.strengths,
        suggestions: analysis.improvement_suggestions,
        scorer_backend: LLM_BACKEND.to_string(),
        raw_analysis: None,
        contact: None,
    }
}
