//! Completed quiz runs. Scoring happens server-side at save time; the
//! stored row keeps the full question set so a past attempt can be
//! reviewed after the source text is gone.

use anyhow::Result;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::quiz::QuizRow;
use crate::tutor::models::Quiz;

use super::stats::{record_activity, Activity};

pub async fn save_completed_quiz(
    pool: &PgPool,
    user_id: Uuid,
    quiz: &Quiz,
    answers: &[usize],
) -> Result<QuizRow> {
    let score = quiz.score(answers) as i32;
    let total_questions = quiz.questions.len() as i32;
    let questions = serde_json::to_value(&quiz.questions)?;

    let row = sqlx::query_as::<_, QuizRow>(
        r#"
        INSERT INTO quizzes (id, user_id, title, questions, score, total_questions, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&quiz.title)
    .bind(&questions)
    .bind(score)
    .bind(total_questions)
    .fetch_one(pool)
    .await?;

    // Counter updates are best-effort; the quiz row is already committed.
    if let Err(e) = record_activity(pool, user_id, Activity::QuizCompleted).await {
        warn!("Failed to record quiz activity for {user_id}: {e}");
    }

    Ok(row)
}

/// Most recent attempt first.
pub async fn list_quizzes(pool: &PgPool, user_id: Uuid) -> Result<Vec<QuizRow>, sqlx::Error> {
    sqlx::query_as::<_, QuizRow>(
        "SELECT * FROM quizzes WHERE user_id = $1 ORDER BY completed_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
