//! Skill-verification badges. Passing a quiz appends its id to the
//! profile's `badges` array exactly once.

pub mod handlers;

use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeAward {
    /// False when the profile already held the badge.
    pub awarded: bool,
    pub badges: Vec<String>,
}

/// Appends `quiz_id` to the profile's badges unless already present.
/// The check and the append happen in one UPDATE, so concurrent awards of
/// the same badge cannot duplicate it.
pub async fn award_badge(pool: &PgPool, user_id: Uuid, quiz_id: &str) -> Result<BadgeAward, AppError> {
    let updated: Option<(Vec<String>,)> = sqlx::query_as(
        r#"
        UPDATE profiles
        SET badges = array_append(COALESCE(badges, '{}'), $1)
        WHERE id = $2 AND NOT ($1 = ANY(COALESCE(badges, '{}')))
        RETURNING badges
        "#,
    )
    .bind(quiz_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if let Some((badges,)) = updated {
        debug!("Badge '{quiz_id}' awarded to {user_id}");
        return Ok(BadgeAward {
            awarded: true,
            badges,
        });
    }

    // Nothing updated: either the badge is already held or the profile is missing.
    let existing: Option<(Vec<String>,)> =
        sqlx::query_as("SELECT COALESCE(badges, '{}') FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    match existing {
        Some((badges,)) => Ok(BadgeAward {
            awarded: false,
            badges,
        }),
        None => Err(AppError::NotFound("Profile not found".to_string())),
    }
}
