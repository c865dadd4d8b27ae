// Prompt constants for proposal drafting.
// The system prompt is the shared JSON-only fragment in llm_client::prompts.

/// Proposal prompt template. Replace `{untrusted}`, `{title}`, `{description}`,
/// `{budget}`, `{company}` and `{location}` before sending.
pub const PROPOSAL_PROMPT_TEMPLATE: &str = r#"Write a freelance project proposal for a student applying to the job below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "project_title": "Landing page redesign",
  "client": "Acme",
  "client_url": "",
  "job_title": "Frontend intern",
  "cover_letter": "Dear Acme team, ...",
  "milestones": [
    {
      "title": "Wireframes",
      "description": "Low-fidelity layouts for review",
      "cost": 150,
      "timeline_days": 3
    }
  ],
  "total_quote": 450,
  "delivery_time": 10
}

Rules:
- "cost" and "total_quote" are plain numbers in the job's currency.
- "timeline_days" and "delivery_time" are whole days.
- "total_quote" equals the sum of milestone costs.

{untrusted}

<<<JOB>>>
- Title: {title}
- Description: {description}
- Budget: {budget}
- Company: {company}
- Location: {location}
<<<END JOB>>>"#;
