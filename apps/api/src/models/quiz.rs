use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A completed quiz run. `questions` holds the full question set as JSON
/// so past quizzes can be reviewed even after the source text is gone;
/// `score` out of `total_questions` is computed server-side at save time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub questions: Value,
    pub score: i32,
    pub total_questions: i32,
    pub completed_at: DateTime<Utc>,
}
