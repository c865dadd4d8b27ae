//! Text primitives shared by the scorer and the role resolver.
//!
//! Everything downstream works on *normalized* text: lower-case, only
//! `[a-z0-9+#./]` plus single spaces. Skill tokens go through the same
//! normalization so a skill and a subject always agree on spelling.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Runs of characters that cannot be part of a skill token (whitespace included).
static RE_NON_SKILL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9+#./]+").expect("static pattern is valid"));

/// Characters treated as part of a word when checking token boundaries.
/// `.` and `/` are separators so "node.js." and "ui/ux" still terminate cleanly.
const WORD_CLASS: &str = "a-z0-9+#";

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("skill is empty after normalization")]
    Empty,

    #[error("invalid skill pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Lower-cases `text`, replaces every run of disallowed characters with a
/// single space and trims the result.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    RE_NON_SKILL.replace_all(&lowered, " ").trim().to_string()
}

/// Normalizes a list of skill strings, dropping empties and keeping the first
/// occurrence of each.
pub fn normalize_skill_list<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let normalized = normalize(skill.as_ref());
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

/// Whole-word matcher for a single skill.
///
/// The skill is escaped before compilation, so tokens such as `c++`,
/// `node.js` or `ci/cd` match literally. Boundaries are explicit groups
/// rather than `\b`, which never fires after a trailing `+`.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    skill: String,
    regex: Regex,
}

impl SkillPattern {
    pub fn new(skill: &str) -> Result<Self, PatternError> {
        let skill = normalize(skill);
        if skill.is_empty() {
            return Err(PatternError::Empty);
        }

        let pattern = format!(
            "(?:^|[^{WORD_CLASS}]){}(?:$|[^{WORD_CLASS}])",
            regex::escape(&skill)
        );
        let regex = Regex::new(&pattern)?;

        Ok(Self { skill, regex })
    }

    /// The normalized skill this pattern matches.
    pub fn skill(&self) -> &str {
        &self.skill
    }

    /// `normalized_text` must already have gone through [`normalize`].
    pub fn is_match(&self, normalized_text: &str) -> bool {
        self.regex.is_match(normalized_text)
    }
}
