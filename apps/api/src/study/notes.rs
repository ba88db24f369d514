//! Saved notes: create, list, delete, plus the search filter applied when
//! listing with a query term.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::note::NoteRow;

use super::stats::{record_activity, Activity};

/// Parameters for saving a note.
pub struct NewNote<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub original_text: &'a str,
    pub simplified_text: &'a str,
    pub key_points: &'a [String],
}

pub async fn create_note(pool: &PgPool, note: NewNote<'_>) -> Result<NoteRow, sqlx::Error> {
    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        INSERT INTO notes (id, user_id, title, original_text, simplified_text, key_points, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(note.user_id)
    .bind(note.title)
    .bind(note.original_text)
    .bind(note.simplified_text)
    .bind(note.key_points)
    .fetch_one(pool)
    .await?;

    // Counter updates are best-effort; the note row is already committed.
    if let Err(e) = record_activity(pool, note.user_id, Activity::NoteSaved).await {
        warn!("Failed to record note activity for {}: {e}", note.user_id);
    }

    Ok(row)
}

/// Newest first.
pub async fn list_notes(pool: &PgPool, user_id: Uuid) -> Result<Vec<NoteRow>, sqlx::Error> {
    sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Returns whether a row was actually deleted. The `user_id` guard keeps
/// one user's delete from reaching another user's note.
pub async fn delete_note(pool: &PgPool, user_id: Uuid, note_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Case-insensitive substring search across title, simplified text and key
/// points. A blank term matches everything.
pub fn note_matches(note: &NoteRow, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    note.title.to_lowercase().contains(&term)
        || note.simplified_text.to_lowercase().contains(&term)
        || note
            .key_points
            .iter()
            .any(|point| point.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(title: &str, simplified: &str, key_points: &[&str]) -> NoteRow {
        NoteRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            original_text: "original".to_string(),
            simplified_text: simplified.to_string(),
            key_points: key_points.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_note_matches_title_case_insensitive() {
        let notes = [note("Alpha", "", &[]), note("Beta", "", &[])];
        let matched: Vec<&str> = notes
            .iter()
            .filter(|n| note_matches(n, "alp"))
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(matched, ["Alpha"]);
    }

    #[test]
    fn test_note_matches_simplified_text_and_key_points() {
        let n = note("Cells", "Mitochondria make energy", &["ATP production"]);
        assert!(note_matches(&n, "mitochondria"));
        assert!(note_matches(&n, "atp"));
        assert!(!note_matches(&n, "photosynthesis"));
    }

    #[test]
    fn test_blank_search_term_matches_everything() {
        let n = note("Anything", "", &[]);
        assert!(note_matches(&n, ""));
        assert!(note_matches(&n, "   "));
    }
}
