use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user activity counters shown on the dashboard.
///
/// `study_plans_created` and `total_study_hours` are read back as stored
/// but no code path in this service increments them yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserStatsRow {
    pub user_id: Uuid,
    pub quizzes_completed: i32,
    pub flashcards_created: i32,
    pub notes_saved: i32,
    pub study_plans_created: i32,
    pub daily_streak: i32,
    pub total_study_hours: i32,
    pub last_activity_date: Option<NaiveDate>,
}

impl UserStatsRow {
    /// Zeroed counters for a user with no recorded activity.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            quizzes_completed: 0,
            flashcards_created: 0,
            notes_saved: 0,
            study_plans_created: 0,
            daily_streak: 0,
            total_study_hours: 0,
            last_activity_date: None,
        }
    }
}
