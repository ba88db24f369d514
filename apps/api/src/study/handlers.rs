//! Axum route handlers for the study library.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::ai::AiPayload;
use crate::errors::AppError;
use crate::models::deck::DeckRow;
use crate::models::note::NoteRow;
use crate::models::quiz::QuizRow;
use crate::models::stats::UserStatsRow;
use crate::state::AppState;
use crate::study::decks::{list_decks, save_deck};
use crate::study::notes::{create_note, delete_note, list_notes, note_matches, NewNote};
use crate::study::quizzes::{list_quizzes, save_completed_quiz};
use crate::study::stats::fetch_stats;
use crate::tutor::models::{Flashcard, Quiz, QuizQuestion};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct NotesQuery {
    pub user_id: Uuid,
    /// Optional search term matched against title, simplified text and
    /// key points.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub user_id: Uuid,
    pub title: String,
    pub original_text: String,
    /// Defaults to the original text when the note was written by hand
    /// rather than produced by the simplifier.
    pub simplified_text: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveQuizRequest {
    pub user_id: Uuid,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    /// The answer index the user picked for each question, in order.
    pub answers: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDeckRequest {
    pub user_id: Uuid,
    pub deck_name: String,
    pub cards: Vec<Flashcard>,
}

// ────────────────────────────────────────────────────────────────────────────
// Note handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/notes?user_id=...&q=...
///
/// Lists the user's notes, newest first, optionally filtered by `q`.
pub async fn handle_list_notes(
    State(state): State<AppState>,
    Query(query): Query<NotesQuery>,
) -> Result<Json<Vec<NoteRow>>, AppError> {
    let notes = list_notes(&state.db, query.user_id).await?;

    let notes = match query.q {
        Some(term) => notes
            .into_iter()
            .filter(|note| note_matches(note, &term))
            .collect(),
        None => notes,
    };

    Ok(Json(notes))
}

/// POST /api/v1/notes
///
/// Saves a note and bumps the notes-saved counter.
pub async fn handle_create_note(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<Json<NoteRow>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.original_text.trim().is_empty() {
        return Err(AppError::Validation(
            "original_text cannot be empty".to_string(),
        ));
    }

    let simplified_text = request
        .simplified_text
        .as_deref()
        .unwrap_or(&request.original_text);

    let note = create_note(
        &state.db,
        NewNote {
            user_id: request.user_id,
            title: request.title.trim(),
            original_text: &request.original_text,
            simplified_text,
            key_points: &request.key_points,
        },
    )
    .await?;

    Ok(Json(note))
}

/// DELETE /api/v1/notes/:id?user_id=...
pub async fn handle_delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Query(query): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let deleted = delete_note(&state.db, query.user_id, note_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Note {note_id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Quiz handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/quizzes?user_id=...
pub async fn handle_list_quizzes(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<QuizRow>>, AppError> {
    let quizzes = list_quizzes(&state.db, query.user_id).await?;
    Ok(Json(quizzes))
}

/// POST /api/v1/quizzes
///
/// Saves a completed run. The score is computed here from the submitted
/// answers, never trusted from the client.
pub async fn handle_save_quiz(
    State(state): State<AppState>,
    Json(request): Json<SaveQuizRequest>,
) -> Result<Json<QuizRow>, AppError> {
    if request.questions.is_empty() {
        return Err(AppError::Validation(
            "a quiz needs at least one question".to_string(),
        ));
    }

    let quiz = Quiz {
        title: request.title,
        questions: request.questions,
    };
    if !quiz.conforms() {
        return Err(AppError::Validation(
            "every correct index must point into its own options".to_string(),
        ));
    }

    let row = save_completed_quiz(&state.db, request.user_id, &quiz, &request.answers)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Deck handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/decks?user_id=...
pub async fn handle_list_decks(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<DeckRow>>, AppError> {
    let decks = list_decks(&state.db, query.user_id).await?;
    Ok(Json(decks))
}

/// POST /api/v1/decks
///
/// Saves a deck of flashcards and bumps the flashcards-created counter.
pub async fn handle_save_deck(
    State(state): State<AppState>,
    Json(request): Json<SaveDeckRequest>,
) -> Result<Json<DeckRow>, AppError> {
    if request.deck_name.trim().is_empty() {
        return Err(AppError::Validation("deck_name cannot be empty".to_string()));
    }
    if request.cards.is_empty() {
        return Err(AppError::Validation(
            "a deck needs at least one card".to_string(),
        ));
    }
    if !request.cards.conforms() {
        return Err(AppError::Validation(
            "every card needs a non-empty front and back".to_string(),
        ));
    }

    let row = save_deck(
        &state.db,
        request.user_id,
        request.deck_name.trim(),
        &request.cards,
    )
    .await
    .map_err(AppError::Internal)?;

    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Stats handler
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/stats?user_id=...
///
/// Dashboard counters; users with no recorded activity get zeroes.
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<UserStatsRow>, AppError> {
    let stats = fetch_stats(&state.db, query.user_id).await?;
    Ok(Json(stats))
}
