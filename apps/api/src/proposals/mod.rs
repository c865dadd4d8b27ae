//! Proposal drafting: turns a job posting into a structured freelance
//! proposal via the LLM client.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, UNTRUSTED_INPUT_INSTRUCTION};
use crate::llm_client::{LlmClient, Structured};
use crate::proposals::prompts::PROPOSAL_PROMPT_TEMPLATE;

/// The job fields a proposal is written against.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub cost: f64,
    #[serde(deserialize_with = "lenient_days")]
    pub timeline_days: u32,
}

/// Model-drafted proposal. Every field defaults, so partial model output
/// still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalDraft {
    pub project_title: String,
    pub client: String,
    pub client_url: String,
    pub job_title: String,
    pub cover_letter: String,
    pub milestones: Vec<Milestone>,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_quote: f64,
    #[serde(deserialize_with = "lenient_days")]
    pub delivery_time: u32,
}

impl ProposalDraft {
    /// Used when the model ignored the JSON instruction: its text becomes the
    /// cover letter and everything else stays empty.
    pub fn from_raw_text(raw: impl Into<String>) -> Self {
        Self {
            cover_letter: raw.into(),
            ..Self::default()
        }
    }
}

/// Accepts `450`, `"450"`, `"$1,200.50"`; anything else reads as 0.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let digits: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };
    Ok(if amount.is_finite() && amount > 0.0 { amount } else { 0.0 })
}

fn lenient_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let days = lenient_amount(deserializer)?;
    Ok(days.round().min(u32::MAX as f64) as u32)
}

pub fn build_prompt(job: &ProposalJob) -> String {
    PROPOSAL_PROMPT_TEMPLATE
        .replace("{untrusted}", UNTRUSTED_INPUT_INSTRUCTION)
        .replace("{title}", job.title.trim())
        .replace(
            "{description}",
            job.description.as_deref().unwrap_or("not specified"),
        )
        .replace(
            "{budget}",
            job.salary_range.as_deref().unwrap_or("not specified"),
        )
        .replace("{company}", job.company_name.as_deref().unwrap_or("Client"))
        .replace("{location}", job.location.as_deref().unwrap_or("not specified"))
}

/// Drafts a proposal. Output that is not JSON degrades to
/// `ProposalDraft::from_raw_text`; transport and API failures are errors.
pub async fn draft_proposal(llm: &LlmClient, job: &ProposalJob) -> Result<ProposalDraft, AppError> {
    let prompt = build_prompt(job);

    match llm
        .call_structured::<ProposalDraft>(&prompt, JSON_ONLY_SYSTEM)
        .await?
    {
        Structured::Parsed(draft) => {
            debug!("Proposal drafted with {} milestones", draft.milestones.len());
            Ok(draft)
        }
        Structured::Unparsed(raw) => {
            warn!("Proposal output was not valid JSON, using raw text as cover letter");
            Ok(ProposalDraft::from_raw_text(raw))
        }
    }
}
