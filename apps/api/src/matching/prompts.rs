// Prompt constants for the AI-assisted resume analysis backend.

/// System prompt for resume analysis: enforces JSON-only output.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an applicant tracking system that compares a student's resume with a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume analysis prompt template. Replace `{requirement}` and `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Compare the resume with the job requirement and score the match.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "found_skills": ["python", "sql"],
  "missing_skills": ["docker"],
  "strengths": ["Found 2 relevant skills in your resume"],
  "improvement_suggestions": ["Add experience with: docker"]
}

Rules:
- "score" is an integer from 0 to 100.
- Skills are short lower-case keywords (e.g. "react", "node.js", "c++").
- A skill may appear in "found_skills" or "missing_skills", never both.
- Only list a skill as found if the resume actually mentions it.

{untrusted}

<<<JOB REQUIREMENT>>>
{requirement}
<<<END JOB REQUIREMENT>>>

<<<RESUME>>>
{resume_text}
<<<END RESUME>>>"#;
