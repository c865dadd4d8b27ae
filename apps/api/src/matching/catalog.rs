//! Skill catalog and role map: the read-only configuration behind matching.
//!
//! Both are built once at startup (from the built-in tables or a JSON file)
//! and never mutated afterwards.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::matching::text::{normalize_skill_list, PatternError, SkillPattern};

/// Built-in catalog of recognized skills, in detection order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "react",
    "next.js",
    "node.js",
    "node",
    "express",
    "django",
    "flask",
    "html",
    "css",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "rest",
    "graphql",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "ci/cd",
    "git",
    "data structures",
    "algorithms",
    "pandas",
    "numpy",
    "machine learning",
    "data analysis",
    "ai",
    "blockchain",
    "agile",
    "scrum",
    "leadership",
    "communication",
    "problem solving",
    "teamwork",
    "project management",
    "ui/ux",
    "design",
    "marketing",
    "sales",
    "customer service",
];

/// Built-in role table used to expand short job titles.
pub const DEFAULT_ROLES: &[(&str, &[&str])] = &[
    (
        "sde",
        &["data structures", "algorithms", "java", "python", "c++", "git"],
    ),
    (
        "software engineer",
        &["data structures", "algorithms", "java", "python", "git"],
    ),
    (
        "backend",
        &["node", "express", "java", "python", "sql", "docker"],
    ),
    (
        "frontend",
        &["javascript", "react", "html", "css", "typescript"],
    ),
    (
        "fullstack",
        &["javascript", "react", "node", "sql", "docker"],
    ),
    ("devops", &["docker", "kubernetes", "aws", "gcp", "ci/cd"]),
    (
        "data",
        &["python", "sql", "pandas", "numpy", "machine learning"],
    ),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog skill #{index} is empty")]
    EmptySkill { index: usize },

    #[error("role #{index} has an empty name")]
    EmptyRole { index: usize },

    #[error("invalid catalog pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// SkillCatalog
// ────────────────────────────────────────────────────────────────────────────

/// Ordered, deduplicated set of canonical skills with precompiled patterns.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    patterns: Vec<SkillPattern>,
}

impl SkillCatalog {
    /// Builds a catalog; entries are normalized and the first occurrence of a
    /// duplicate wins. Any entry that normalizes to nothing is rejected.
    pub fn new<S: AsRef<str>>(skills: &[S]) -> Result<Self, CatalogError> {
        let mut patterns: Vec<SkillPattern> = Vec::with_capacity(skills.len());
        for (index, raw) in skills.iter().enumerate() {
            let pattern = match SkillPattern::new(raw.as_ref()) {
                Ok(p) => p,
                Err(PatternError::Empty) => return Err(CatalogError::EmptySkill { index }),
                Err(e) => return Err(e.into()),
            };
            if !patterns.iter().any(|p| p.skill() == pattern.skill()) {
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    pub fn defaults() -> Result<Self, CatalogError> {
        Self::new(DEFAULT_SKILLS)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(SkillPattern::skill)
    }

    /// Catalog skills whole-word present in `normalized_text`, in catalog order.
    pub fn detect(&self, normalized_text: &str) -> Vec<String> {
        if normalized_text.is_empty() {
            return Vec::new();
        }
        self.patterns
            .iter()
            .filter(|p| p.is_match(normalized_text))
            .map(|p| p.skill().to_string())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RoleSkillMap
// ────────────────────────────────────────────────────────────────────────────

/// Ordered `(role, implied skills)` table. Iteration follows configuration order.
#[derive(Debug, Clone, Default)]
pub struct RoleSkillMap {
    roles: Vec<(String, Vec<String>)>,
}

impl RoleSkillMap {
    pub fn new<R, S>(entries: &[(R, Vec<S>)]) -> Result<Self, CatalogError>
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        let mut roles: Vec<(String, Vec<String>)> = Vec::with_capacity(entries.len());
        for (index, (role, skills)) in entries.iter().enumerate() {
            let role = role.as_ref().trim().to_lowercase();
            if role.is_empty() {
                return Err(CatalogError::EmptyRole { index });
            }
            let skills = normalize_skill_list(skills.as_slice());
            match roles.iter_mut().find(|(existing, _)| *existing == role) {
                Some((_, existing)) => {
                    for skill in skills {
                        if !existing.contains(&skill) {
                            existing.push(skill);
                        }
                    }
                }
                None => roles.push((role, skills)),
            }
        }
        Ok(Self { roles })
    }

    pub fn defaults() -> Result<Self, CatalogError> {
        let entries: Vec<(&str, Vec<&str>)> = DEFAULT_ROLES
            .iter()
            .map(|(role, skills)| (*role, skills.to_vec()))
            .collect();
        Self::new(&entries)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.roles
            .iter()
            .map(|(role, skills)| (role.as_str(), skills.as_slice()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File loading
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<String>,
    #[serde(default)]
    roles: Vec<RoleEntry>,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    role: String,
    #[serde(default)]
    skills: Vec<String>,
}

/// Loads a catalog and role map from a JSON file:
/// `{"skills": [...], "roles": [{"role": "...", "skills": [...]}]}`.
pub fn load_catalog_file(path: &Path) -> Result<(SkillCatalog, RoleSkillMap), CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

fn parse_catalog(content: &str) -> Result<(SkillCatalog, RoleSkillMap), CatalogError> {
    let file: CatalogFile = serde_json::from_str(content)?;
    let catalog = SkillCatalog::new(&file.skills)?;
    let entries: Vec<(String, Vec<String>)> = file
        .roles
        .into_iter()
        .map(|entry| (entry.role, entry.skills))
        .collect();
    let roles = RoleSkillMap::new(&entries)?;
    Ok((catalog, roles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::text::normalize;
    use std::io::Write;

    #[test]
    fn test_default_catalog_entries_are_canonical() {
        let catalog = SkillCatalog::defaults().unwrap();
        assert_eq!(catalog.len(), DEFAULT_SKILLS.len());
        for skill in catalog.skills() {
            assert!(!skill.is_empty());
            assert_eq!(skill, skill.trim());
            assert_eq!(skill, skill.to_lowercase());
        }
    }

    #[test]
    fn test_catalog_normalizes_and_dedups() {
        let catalog = SkillCatalog::new(&[" Python ", "REACT", "python"]).unwrap();
        let skills: Vec<&str> = catalog.skills().collect();
        assert_eq!(skills, vec!["python", "react"]);
    }

    #[test]
    fn test_catalog_rejects_empty_entry() {
        let err = SkillCatalog::new(&["rust", "  "]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySkill { index: 1 }));
    }

    #[test]
    fn test_detect_keeps_catalog_order() {
        let catalog = SkillCatalog::defaults().unwrap();
        let detected = catalog.detect(&normalize("SQL, React and Python"));
        assert_eq!(detected, vec!["python", "react", "sql"]);
    }

    #[test]
    fn test_detect_empty_text() {
        let catalog = SkillCatalog::defaults().unwrap();
        assert!(catalog.detect("").is_empty());
    }

    #[test]
    fn test_role_map_defaults_preserve_order() {
        let roles = RoleSkillMap::defaults().unwrap();
        let names: Vec<&str> = roles.iter().map(|(role, _)| role).collect();
        assert_eq!(
            names,
            vec![
                "sde",
                "software engineer",
                "backend",
                "frontend",
                "fullstack",
                "devops",
                "data"
            ]
        );
    }

    #[test]
    fn test_role_map_rejects_empty_role() {
        let err = RoleSkillMap::new(&[(" ", vec!["git"])]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyRole { index: 0 }));
    }

    #[test]
    fn test_role_map_merges_duplicate_roles() {
        let roles =
            RoleSkillMap::new(&[("QA", vec!["selenium"]), ("qa", vec!["Selenium", "jest"])])
                .unwrap();
        assert_eq!(roles.len(), 1);
        let (role, skills) = roles.iter().next().unwrap();
        assert_eq!(role, "qa");
        assert_eq!(skills.to_vec(), vec!["selenium".to_string(), "jest".to_string()]);
    }

    #[test]
    fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"skills": ["Rust", "Go"], "roles": [{{"role": "Systems", "skills": ["rust", "c++"]}}]}}"#
        )
        .unwrap();

        let (catalog, roles) = load_catalog_file(file.path()).unwrap();
        assert_eq!(catalog.skills().collect::<Vec<_>>(), vec!["rust", "go"]);
        let (role, skills) = roles.iter().next().unwrap();
        assert_eq!(role, "systems");
        assert_eq!(skills.to_vec(), vec!["rust".to_string(), "c++".to_string()]);
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_json() {
        assert!(matches!(
            parse_catalog("{\"skills\": 3}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
