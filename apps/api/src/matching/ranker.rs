//! Candidate Ranker: orders candidate profiles for one job.
//!
//! `score = 2 × skill overlap + availability match`. Skill overlap dominates;
//! availability only breaks ties between equal overlaps. The sort is stable,
//! so equal scores keep input order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const SKILL_WEIGHT: u32 = 2;
const AVAILABILITY_WEIGHT: u32 = 1;

/// The parts of a job that ranking looks at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// A candidate profile reduced to its ranking inputs. `skills` is a tag list,
/// not free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    /// 1-based position in the ranked output.
    pub rank: usize,
    pub score: u32,
    pub skill_overlap_count: usize,
    pub availability_match: bool,
}

/// Ranks `candidates` against `job`, best first.
pub fn rank(job: &JobRequirements, candidates: &[Candidate]) -> Vec<RankedCandidate> {
    let required: HashSet<String> = job.required_skills.iter().map(|s| canonical(s)).collect();

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| {
            let overlap: HashSet<String> = candidate
                .skills
                .iter()
                .map(|s| canonical(s))
                .filter(|s| required.contains(s))
                .collect();
            // Stored values compare as-is; two missing values count as a match.
            let availability_match = candidate.availability == job.availability;

            let skill_overlap_count = overlap.len();
            let score = skill_overlap_count as u32 * SKILL_WEIGHT
                + if availability_match {
                    AVAILABILITY_WEIGHT
                } else {
                    0
                };

            RankedCandidate {
                candidate_id: candidate.id.clone(),
                rank: 0,
                score,
                skill_overlap_count,
                availability_match,
            }
        })
        .collect();

    // `sort_by` is stable: ties keep input order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    for (index, entry) in ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    ranked
}

fn canonical(skill: &str) -> String {
    skill.trim().to_lowercase()
}
