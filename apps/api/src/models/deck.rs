use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A saved flashcard deck. `cards` is the JSON array of front/back pairs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeckRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub deck_name: String,
    pub cards: Value,
    pub created_at: DateTime<Utc>,
}
