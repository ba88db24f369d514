//! Saved flashcard decks. Cards are stored as a JSON array and read back
//! verbatim — a deck of N cards reloads as the same N cards in order.

use anyhow::Result;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::deck::DeckRow;
use crate::tutor::models::Flashcard;

use super::stats::{record_activity, Activity};

pub async fn save_deck(
    pool: &PgPool,
    user_id: Uuid,
    deck_name: &str,
    cards: &[Flashcard],
) -> Result<DeckRow> {
    let cards_json = serde_json::to_value(cards)?;

    let row = sqlx::query_as::<_, DeckRow>(
        r#"
        INSERT INTO flashcards (id, user_id, deck_name, cards, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(deck_name)
    .bind(&cards_json)
    .fetch_one(pool)
    .await?;

    // Counter updates are best-effort; the deck row is already committed.
    if let Err(e) = record_activity(pool, user_id, Activity::DeckSaved).await {
        warn!("Failed to record deck activity for {user_id}: {e}");
    }

    Ok(row)
}

/// Newest deck first.
pub async fn list_decks(pool: &PgPool, user_id: Uuid) -> Result<Vec<DeckRow>, sqlx::Error> {
    sqlx::query_as::<_, DeckRow>(
        "SELECT * FROM flashcards WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_survive_json_storage_round_trip() {
        let cards = vec![
            Flashcard {
                front: "What is ATP?".to_string(),
                back: "The cell's energy currency".to_string(),
            },
            Flashcard {
                front: "Where is it made?".to_string(),
                back: "Mitochondria".to_string(),
            },
            Flashcard {
                front: "Key Term".to_string(),
                back: "Definition".to_string(),
            },
        ];

        let stored = serde_json::to_value(&cards).unwrap();
        let reloaded: Vec<Flashcard> = serde_json::from_value(stored).unwrap();

        assert_eq!(reloaded, cards, "same cards, same order");
    }
}
