//! Skill Match Scorer: resume text vs an ordered required-skill list.
//!
//! Deterministic and total: any string and any list (including empty ones)
//! produce a well-formed `MatchResult`.
//!
//! Score precedence:
//! 1. required list non-empty → `round(100 × found / required)`
//! 2. otherwise, catalog skills detected in the resume → 100 at four or more,
//!    else `min(90, 25 × detected)`
//! 3. otherwise 0

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matching::catalog::SkillCatalog;
use crate::matching::contact::ContactInfo;
use crate::matching::text::{normalize, normalize_skill_list, SkillPattern};

pub const KEYWORD_BACKEND: &str = "keyword";
pub const LLM_BACKEND: &str = "llm";

const COMMUNICATION_SKILL: &str = "communication";

const FALLBACK_FULL_SCORE_AT: usize = 4;
const FALLBACK_POINTS_PER_SKILL: usize = 25;
const FALLBACK_CAP: usize = 90;

/// Result of matching one resume against one requirement.
///
/// `found_skills` and `missing_skills` partition `required_skills`.
/// `detected_skills` is independent of the requirement and drives the
/// fallback score when nothing is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResult {
    pub score: u32,
    /// Mirror of `score` kept for clients of the older upload endpoint.
    pub match_percentage: u32,
    pub required_skills: Vec<String>,
    pub found_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub detected_skills: Vec<String>,
    pub strengths: Vec<String>,
    #[serde(rename = "improvement_suggestions")]
    pub suggestions: Vec<String>,
    pub scorer_backend: String, // "keyword" | "llm"
    /// Raw upstream text, only set when an AI backend produced unusable output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
    /// Contact details read from an uploaded resume file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

impl MatchResult {
    /// Empty but well-formed result carrying the raw text for diagnostics.
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self {
            scorer_backend: LLM_BACKEND.to_string(),
            raw_analysis: Some(raw.into()),
            ..Self::default()
        }
    }
}

/// Scores `subject` (resume text) against `required` skills.
pub fn score(subject: &str, required: &[String], catalog: &SkillCatalog) -> MatchResult {
    let subject = normalize(subject);
    let required = normalize_skill_list(required);
    let detected = catalog.detect(&subject);

    let (found, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| skill_present(&subject, skill));

    let score = if required.is_empty() {
        fallback_score(detected.len())
    } else {
        ratio_score(found.len(), required.len())
    };

    let strengths = build_strengths(&found, &detected, required.is_empty());
    let suggestions = vec![build_suggestion(&missing)];

    MatchResult {
        score,
        match_percentage: score,
        required_skills: required,
        found_skills: found,
        missing_skills: missing,
        detected_skills: detected,
        strengths,
        suggestions,
        scorer_backend: KEYWORD_BACKEND.to_string(),
        raw_analysis: None,
        contact: None,
    }
}

fn skill_present(normalized_subject: &str, skill: &str) -> bool {
    match SkillPattern::new(skill) {
        Ok(pattern) => pattern.is_match(normalized_subject),
        Err(e) => {
            warn!("Skipping unmatchable skill '{skill}': {e}");
            false
        }
    }
}

fn ratio_score(found: usize, required: usize) -> u32 {
    if required == 0 {
        return 0;
    }
    ((found as f64 / required as f64) * 100.0).round() as u32
}

fn fallback_score(detected: usize) -> u32 {
    if detected >= FALLBACK_FULL_SCORE_AT {
        100
    } else {
        (detected * FALLBACK_POINTS_PER_SKILL).min(FALLBACK_CAP) as u32
    }
}

/// The count sentence always reads "Found N relevant skills". With no
/// required skills, N counts the catalog skills detected in the resume,
/// since nothing else was looked for.
fn build_strengths(found: &[String], detected: &[String], fallback: bool) -> Vec<String> {
    let relevant = if fallback { detected } else { found };
    let count_sentence = format!("Found {} relevant skills in your resume", relevant.len());

    let callout = if relevant.iter().any(|s| s == COMMUNICATION_SKILL) {
        "Strong communication skills highlighted"
    } else {
        "Your resume shows good technical background"
    };

    vec![count_sentence, callout.to_string()]
}

fn build_suggestion(missing: &[String]) -> String {
    if missing.is_empty() {
        "Your skills match well with the job requirements".to_string()
    } else {
        format!("Add experience with: {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::defaults().unwrap()
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whole_word_java_not_in_javascript() {
        let result = score("javascript developer", &skills(&["java"]), &catalog());
        assert!(result.found_skills.is_empty());
        assert_eq!(result.missing_skills, vec!["java"]);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_escaped_cpp_token_found() {
        let result = score("experienced in c++", &skills(&["c++"]), &catalog());
        assert_eq!(result.found_skills, vec!["c++"]);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_full_match_scores_100() {
        let result = score(
            "Built Python services backed by SQL databases",
            &skills(&["python", "sql"]),
            &catalog(),
        );
        assert_eq!(result.score, 100);
        assert_eq!(result.match_percentage, 100);
        assert!(result.missing_skills.is_empty());
        assert_eq!(
            result.suggestions,
            vec!["Your skills match well with the job requirements"]
        );
    }

    #[test]
    fn test_zero_overlap_with_empty_subject() {
        let result = score("", &skills(&["react"]), &catalog());
        assert!(result.found_skills.is_empty());
        assert_eq!(result.missing_skills, vec!["react"]);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_partial_match_rounds() {
        // 1 of 3 → 33.33 → 33; 2 of 3 → 66.67 → 67
        let one = score("python", &skills(&["python", "sql", "docker"]), &catalog());
        assert_eq!(one.score, 33);
        let two = score("python sql", &skills(&["python", "sql", "docker"]), &catalog());
        assert_eq!(two.score, 67);
    }

    #[test]
    fn test_missing_suggestion_names_all_missing_skills() {
        let result = score("react", &skills(&["react", "docker", "aws"]), &catalog());
        assert_eq!(result.suggestions, vec!["Add experience with: docker, aws"]);
    }

    #[test]
    fn test_required_list_is_normalized_and_deduped() {
        let result = score("React", &skills(&["React", " react ", "", "SQL"]), &catalog());
        assert_eq!(result.required_skills, vec!["react", "sql"]);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_required_skill_outside_catalog_still_matched() {
        let result = score("Shipped Rust and Go services", &skills(&["rust"]), &catalog());
        assert_eq!(result.found_skills, vec!["rust"]);
    }

    #[test]
    fn test_fallback_scores_detected_skills() {
        let none = score("I like gardening", &[], &catalog());
        assert_eq!(none.score, 0);

        let two = score("python and docker", &[], &catalog());
        assert_eq!(two.detected_skills, vec!["python", "docker"]);
        assert_eq!(two.score, 50);

        let three = score("python, docker, git", &[], &catalog());
        assert_eq!(three.score, 75);

        let four = score("python, docker, git, react", &[], &catalog());
        assert_eq!(four.score, 100);
    }

    #[test]
    fn test_fallback_has_empty_found_and_missing() {
        let result = score("python and docker", &[], &catalog());
        assert!(result.found_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.strengths[0], "Found 2 relevant skills in your resume");
        assert_eq!(result.detected_skills, vec!["python", "docker"]);
    }

    #[test]
    fn test_fallback_highlights_detected_communication() {
        let result = score("Strong communication, python", &[], &catalog());
        assert_eq!(result.strengths[0], "Found 2 relevant skills in your resume");
        assert_eq!(result.strengths[1], "Strong communication skills highlighted");
    }

    #[test]
    fn test_fallback_cap_formula() {
        assert_eq!(fallback_score(0), 0);
        assert_eq!(fallback_score(1), 25);
        assert_eq!(fallback_score(3), 75);
        assert_eq!(fallback_score(4), 100);
        assert_eq!(fallback_score(40), 100);
    }

    #[test]
    fn test_communication_callout() {
        let with = score(
            "Excellent communication and teamwork",
            &skills(&["communication"]),
            &catalog(),
        );
        assert_eq!(with.strengths[0], "Found 1 relevant skills in your resume");
        assert_eq!(with.strengths[1], "Strong communication skills highlighted");

        let without = score("python", &skills(&["python"]), &catalog());
        assert_eq!(
            without.strengths[1],
            "Your resume shows good technical background"
        );
    }

    #[test]
    fn test_score_is_idempotent() {
        let required = skills(&["python", "react", "c++"]);
        let a = score("React and C++ developer", &required, &catalog());
        let b = score("React and C++ developer", &required, &catalog());
        assert_eq!(a, b);
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let cases: Vec<(&str, Vec<String>)> = vec![
            ("", vec![]),
            ("", skills(&["react"])),
            ("javascript java c++ c#", skills(&["java", "c", "c#", "go"])),
            ("node.js nodejs", skills(&["node.js", "node", "nodejs"])),
            ("python python python", skills(&["python"])),
            ("ai/ml, ui/ux", skills(&["ui/ux", "ai", "ml"])),
            ("python docker git react sql aws", vec![]),
        ];

        for (subject, required) in cases {
            let result = score(subject, &required, &catalog());
            assert!(result.score <= 100, "score {} for {subject:?}", result.score);
            for skill in &result.found_skills {
                assert!(!result.missing_skills.contains(skill));
                assert!(result.required_skills.contains(skill));
            }
            for skill in &result.missing_skills {
                assert!(result.required_skills.contains(skill));
            }
            assert_eq!(
                result.found_skills.len() + result.missing_skills.len(),
                result.required_skills.len()
            );
        }
    }

    #[test]
    fn test_unparsed_result_is_empty_but_well_formed() {
        let result = MatchResult::unparsed("not json");
        assert_eq!(result.score, 0);
        assert!(result.found_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.raw_analysis.as_deref(), Some("not json"));
        assert_eq!(result.scorer_backend, "llm");
    }

    #[test]
    fn test_wire_format_field_names() {
        let result = score("python", &skills(&["python", "sql"]), &catalog());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["score"], 50);
        assert_eq!(value["match_percentage"], 50);
        assert_eq!(value["found_skills"][0], "python");
        assert_eq!(value["missing_skills"][0], "sql");
        assert!(value["improvement_suggestions"].is_array());
        assert!(value.get("suggestions").is_none());
        assert!(value.get("raw_analysis").is_none());
    }
}
