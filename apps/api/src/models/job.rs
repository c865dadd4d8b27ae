use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::matching::ranker::JobRequirements;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub availability: Option<String>,
    pub salary_range: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, title, description,
                   COALESCE(required_skills, '{}') AS required_skills,
                   availability, salary_range, company_name, location, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub fn requirements(&self) -> JobRequirements {
        JobRequirements {
            required_skills: self.required_skills.clone(),
            availability: self.availability.clone(),
        }
    }
}
