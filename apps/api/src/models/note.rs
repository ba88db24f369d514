use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved note: the original passage together with its simplified form
/// and extracted key points.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub original_text: String,
    pub simplified_text: String,
    pub key_points: Vec<String>,
    pub created_at: DateTime<Utc>,
}
