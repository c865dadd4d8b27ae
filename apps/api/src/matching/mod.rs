// Resume/job matching engine.
// Pure core: text, catalog, skill_match, role_expansion, ranker.
// Collaborators: analyzer (pluggable backends), upload (resume intake), handlers.
// The core never performs I/O; AI calls happen before it, in analyzer.

pub mod analyzer;
pub mod catalog;
pub mod contact;
pub mod handlers;
pub mod prompts;
pub mod ranker;
pub mod role_expansion;
pub mod skill_match;
pub mod text;
pub mod upload;

use std::path::Path;

use crate::matching::catalog::{load_catalog_file, CatalogError, RoleSkillMap, SkillCatalog};
use crate::matching::ranker::{Candidate, JobRequirements, RankedCandidate};
use crate::matching::role_expansion::Requirement;
use crate::matching::skill_match::MatchResult;

/// One immutable catalog snapshot plus the operations that use it.
/// Shared as `Arc<MatchEngine>`; nothing mutates it after startup.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: SkillCatalog,
    roles: RoleSkillMap,
}

impl MatchEngine {
    pub fn new(catalog: SkillCatalog, roles: RoleSkillMap) -> Self {
        Self { catalog, roles }
    }

    pub fn with_defaults() -> Result<Self, CatalogError> {
        Ok(Self::new(SkillCatalog::defaults()?, RoleSkillMap::defaults()?))
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let (catalog, roles) = load_catalog_file(path)?;
        Ok(Self::new(catalog, roles))
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn roles(&self) -> &RoleSkillMap {
        &self.roles
    }

    /// Required skills for either requirement shape.
    pub fn expand(&self, requirement: &Requirement) -> Vec<String> {
        role_expansion::resolve(requirement, &self.roles, &self.catalog)
    }

    pub fn score(&self, subject: &str, required: &[String]) -> MatchResult {
        skill_match::score(subject, required, &self.catalog)
    }

    /// Expand the requirement, then score the subject against it.
    pub fn analyze(&self, subject: &str, requirement: &Requirement) -> MatchResult {
        let required = self.expand(requirement);
        self.score(subject, &required)
    }

    pub fn rank(&self, job: &JobRequirements, candidates: &[Candidate]) -> Vec<RankedCandidate> {
        ranker::rank(job, candidates)
    }
}
