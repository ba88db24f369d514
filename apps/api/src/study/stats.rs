//! Per-user dashboard counters and the daily study streak.
//!
//! Counters follow the persistence service's contract: read the current
//! row, add one, write it back. There is no atomic increment, so two
//! concurrent activities by the same user can under-count — accepted for
//! dashboard figures.

use chrono::{Days, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::stats::UserStatsRow;

/// Library actions that bump a dashboard counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    NoteSaved,
    QuizCompleted,
    DeckSaved,
}

/// Returns the user's counters, zeroed when none have been recorded yet.
pub async fn fetch_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStatsRow, sqlx::Error> {
    let row = sqlx::query_as::<_, UserStatsRow>("SELECT * FROM user_stats WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.unwrap_or_else(|| UserStatsRow::empty(user_id)))
}

/// Bumps the counter for one activity and maintains the daily streak.
pub async fn record_activity(
    pool: &PgPool,
    user_id: Uuid,
    activity: Activity,
) -> Result<(), sqlx::Error> {
    let today = Utc::now().date_naive();

    let existing = sqlx::query_as::<_, UserStatsRow>("SELECT * FROM user_stats WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match existing {
        Some(mut stats) => {
            stats.daily_streak = next_streak(stats.daily_streak, stats.last_activity_date, today);
            stats.last_activity_date = Some(today);
            apply(&mut stats, activity);

            sqlx::query(
                r#"
                UPDATE user_stats
                SET quizzes_completed = $2,
                    flashcards_created = $3,
                    notes_saved = $4,
                    daily_streak = $5,
                    last_activity_date = $6
                WHERE user_id = $1
                "#,
            )
            .bind(user_id)
            .bind(stats.quizzes_completed)
            .bind(stats.flashcards_created)
            .bind(stats.notes_saved)
            .bind(stats.daily_streak)
            .bind(stats.last_activity_date)
            .execute(pool)
            .await?;
        }
        None => {
            let mut stats = UserStatsRow::empty(user_id);
            stats.daily_streak = 1;
            stats.last_activity_date = Some(today);
            apply(&mut stats, activity);

            sqlx::query(
                r#"
                INSERT INTO user_stats
                    (user_id, quizzes_completed, flashcards_created, notes_saved,
                     study_plans_created, daily_streak, total_study_hours, last_activity_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(user_id)
            .bind(stats.quizzes_completed)
            .bind(stats.flashcards_created)
            .bind(stats.notes_saved)
            .bind(stats.study_plans_created)
            .bind(stats.daily_streak)
            .bind(stats.total_study_hours)
            .bind(stats.last_activity_date)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

fn apply(stats: &mut UserStatsRow, activity: Activity) {
    match activity {
        Activity::NoteSaved => stats.notes_saved += 1,
        Activity::QuizCompleted => stats.quizzes_completed += 1,
        Activity::DeckSaved => stats.flashcards_created += 1,
    }
}

/// Same-day activity keeps the streak, next-day activity extends it, and
/// any gap (or a fresh row) resets it to 1.
fn next_streak(current: i32, last_activity: Option<NaiveDate>, today: NaiveDate) -> i32 {
    match last_activity {
        Some(last) if last == today => current.max(1),
        Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => current + 1,
        _ => 1,
    }
}
