pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::study::handlers as study_handlers;
use crate::tutor::handlers as tutor_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI tutor capabilities
        .route(
            "/api/v1/tutor/simplify",
            post(tutor_handlers::handle_simplify),
        )
        .route(
            "/api/v1/tutor/plan",
            post(tutor_handlers::handle_study_plan),
        )
        .route("/api/v1/tutor/chat", post(tutor_handlers::handle_chat))
        .route("/api/v1/tutor/quiz", post(tutor_handlers::handle_quiz))
        .route(
            "/api/v1/tutor/flashcards",
            post(tutor_handlers::handle_flashcards),
        )
        .route("/api/v1/tutor/solve", post(tutor_handlers::handle_solve))
        .route("/api/v1/tutor/careers", post(tutor_handlers::handle_careers))
        // Gemini credential management
        .route(
            "/api/v1/credentials",
            get(tutor_handlers::handle_credential_status)
                .put(tutor_handlers::handle_set_credential)
                .delete(tutor_handlers::handle_clear_credential),
        )
        // Study library
        .route(
            "/api/v1/notes",
            get(study_handlers::handle_list_notes).post(study_handlers::handle_create_note),
        )
        .route(
            "/api/v1/notes/:id",
            delete(study_handlers::handle_delete_note),
        )
        .route(
            "/api/v1/quizzes",
            get(study_handlers::handle_list_quizzes).post(study_handlers::handle_save_quiz),
        )
        .route(
            "/api/v1/decks",
            get(study_handlers::handle_list_decks).post(study_handlers::handle_save_deck),
        )
        .route("/api/v1/stats", get(study_handlers::handle_get_stats))
        .with_state(state)
}
