use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::matching::ranker::Candidate;

/// A column that holds either a comma-separated string or an array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleList {
    Scalar(String),
    List(Vec<String>),
}

impl FlexibleList {
    /// Scalars split on commas; items trimmed, empties dropped.
    pub fn into_items(self) -> Vec<String> {
        let items = match self {
            FlexibleList::Scalar(s) => s.split(',').map(str::to_string).collect(),
            FlexibleList::List(items) => items,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub skills: Option<Json<FlexibleList>>,
    pub availability: Option<String>,
}

/// Profile as returned to clients, with skills already resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub skills: Vec<String>,
    pub availability: Option<String>,
}

impl ProfileRow {
    /// `to_jsonb` keeps both text and text[] skill columns readable.
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, full_name, to_jsonb(skills) AS skills, availability FROM profiles",
        )
        .fetch_all(pool)
        .await
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            full_name: row.full_name,
            skills: row.skills.map(|Json(list)| list.into_items()).unwrap_or_default(),
            availability: row.availability,
        }
    }
}

impl Profile {
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.id.to_string(),
            skills: self.skills.clone(),
            availability: self.availability.clone(),
        }
    }
}
