//! Role Expansion Resolver: turns a requirement into an ordered skill list.
//!
//! Short titles such as "SDE" or "Frontend" mention no catalog skill; the
//! role map supplies the skills they imply. Explicit catalog hits always come
//! first and are never replaced.

use serde::{Deserialize, Serialize};

use crate::matching::catalog::{RoleSkillMap, SkillCatalog};
use crate::matching::text::{normalize, normalize_skill_list};

/// Inputs with at most this many words may also hit a role by exact word.
const SHORT_INPUT_WORDS: usize = 3;

/// The requirement side of a match: free text, or a pre-extracted skill list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Text(String),
    Skills(Vec<String>),
}

impl Requirement {
    pub fn is_blank(&self) -> bool {
        match self {
            Requirement::Text(text) => text.trim().is_empty(),
            Requirement::Skills(skills) => skills.iter().all(|s| s.trim().is_empty()),
        }
    }
}

/// Expands free requirement text into required skills.
///
/// Order: catalog hits (catalog order), then role-implied skills in role-map
/// order, deduplicated by first occurrence.
pub fn expand(requirement_text: &str, roles: &RoleSkillMap, catalog: &SkillCatalog) -> Vec<String> {
    let lowered = requirement_text.to_lowercase();
    let mut required = catalog.detect(&normalize(&lowered));

    let words: Vec<&str> = lowered.split_whitespace().collect();
    for (role, implied) in roles.iter() {
        let hit = lowered.contains(role)
            || (words.len() <= SHORT_INPUT_WORDS && words.iter().any(|w| *w == role));
        if !hit {
            continue;
        }
        for skill in implied {
            if !required.contains(skill) {
                required.push(skill.clone());
            }
        }
    }

    required
}

/// Resolves either requirement shape. Explicit skill lists are normalized and
/// deduplicated but not role-expanded.
pub fn resolve(requirement: &Requirement, roles: &RoleSkillMap, catalog: &SkillCatalog) -> Vec<String> {
    match requirement {
        Requirement::Text(text) => expand(text, roles, catalog),
        Requirement::Skills(skills) => normalize_skill_list(skills.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (RoleSkillMap, SkillCatalog) {
        (
            RoleSkillMap::defaults().unwrap(),
            SkillCatalog::defaults().unwrap(),
        )
    }

    #[test]
    fn test_sde_expands_to_role_skills() {
        let (roles, catalog) = setup();
        let required = expand("SDE", &roles, &catalog);
        assert_eq!(
            required,
            vec!["data structures", "algorithms", "java", "python", "c++", "git"]
        );
    }

    #[test]
    fn test_frontend_title_expands() {
        let (roles, catalog) = setup();
        let required = expand("Frontend", &roles, &catalog);
        assert_eq!(
            required,
            vec!["javascript", "react", "html", "css", "typescript"]
        );
    }

    #[test]
    fn test_explicit_skills_come_first_then_role_skills() {
        let (roles, catalog) = setup();
        let required = expand("Backend intern: Docker and Go", &roles, &catalog);
        // explicit: docker; role "backend": node, express, java, python, sql (docker deduped)
        assert_eq!(
            required,
            vec!["docker", "node", "express", "java", "python", "sql"]
        );
    }

    #[test]
    fn test_long_description_without_roles_uses_explicit_only() {
        let (roles, catalog) = setup();
        let required = expand(
            "We are hiring an intern comfortable with React, CSS and Git workflows",
            &roles,
            &catalog,
        );
        assert_eq!(required, vec!["react", "css", "git"]);
    }

    #[test]
    fn test_role_matches_as_substring() {
        let (roles, catalog) = setup();
        // "data" is a substring of "database"
        let required = expand("database administrator", &roles, &catalog);
        assert_eq!(
            required,
            vec!["python", "sql", "pandas", "numpy", "machine learning"]
        );
    }

    #[test]
    fn test_multiple_roles_merge_in_map_order() {
        let (roles, catalog) = setup();
        let required = expand("frontend devops", &roles, &catalog);
        assert_eq!(
            required,
            vec![
                "javascript",
                "react",
                "html",
                "css",
                "typescript",
                "docker",
                "kubernetes",
                "aws",
                "gcp",
                "ci/cd"
            ]
        );
    }

    #[test]
    fn test_empty_requirement_yields_empty_list() {
        let (roles, catalog) = setup();
        assert!(expand("", &roles, &catalog).is_empty());
        assert!(expand("   ", &roles, &catalog).is_empty());
    }

    #[test]
    fn test_output_has_no_duplicates() {
        let (roles, catalog) = setup();
        let required = expand("sde software engineer fullstack backend", &roles, &catalog);
        let mut seen = std::collections::HashSet::new();
        for skill in &required {
            assert!(seen.insert(skill), "duplicate {skill}");
        }
    }

    #[test]
    fn test_resolve_skill_list_is_not_expanded() {
        let (roles, catalog) = setup();
        let requirement = Requirement::Skills(vec!["SDE".to_string(), " Rust ".to_string()]);
        assert_eq!(resolve(&requirement, &roles, &catalog), vec!["sde", "rust"]);
    }

    #[test]
    fn test_requirement_deserializes_either_shape() {
        let text: Requirement = serde_json::from_str(r#""Frontend developer""#).unwrap();
        assert_eq!(text, Requirement::Text("Frontend developer".to_string()));

        let list: Requirement = serde_json::from_str(r#"["react", "css"]"#).unwrap();
        assert_eq!(
            list,
            Requirement::Skills(vec!["react".to_string(), "css".to_string()])
        );
    }

    #[test]
    fn test_requirement_blankness() {
        assert!(Requirement::Text("  ".to_string()).is_blank());
        assert!(Requirement::Skills(vec![]).is_blank());
        assert!(Requirement::Skills(vec![" ".to_string()]).is_blank());
        assert!(!Requirement::Skills(vec!["git".to_string()]).is_blank());
    }
}
