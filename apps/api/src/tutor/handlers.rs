//! Axum route handlers for the AI tutor and credential endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::Provenance;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tutor::capabilities::{
    advisory_weeks, chat_reply, explore_career_paths, generate_flashcards, generate_quiz,
    generate_study_plan, simplify_text, solve_step_by_step,
};
use crate::tutor::models::{
    CareerExploration, Flashcard, Quiz, Simplification, Solution, StudyPlanWeek,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SimplifyResponse {
    pub simplification: Simplification,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    pub user_id: Uuid,
    pub topics: Vec<String>,
    pub target_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub weeks_available: u32,
    pub plan: Vec<StudyPlanWeek>,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz: Quiz,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlashcardsRequest {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FlashcardsResponse {
    pub cards: Vec<Flashcard>,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub user_id: Uuid,
    pub problem: String,
}

#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub solution: Solution,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CareersRequest {
    pub user_id: Uuid,
    pub concept: String,
}

#[derive(Debug, Serialize)]
pub struct CareersResponse {
    pub exploration: CareerExploration,
    pub provenance: Provenance,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub user_id: Uuid,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatusResponse {
    /// The key this user stored, if any. The service-wide default is
    /// never echoed back.
    pub api_key: Option<String>,
    /// Whether an AI call for this user would find a usable key.
    pub ready: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Capability handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tutor/simplify
///
/// Rewrites a passage in plain language with 3-5 key points.
pub async fn handle_simplify(
    State(state): State<AppState>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = simplify_text(&state.ai, api_key.as_deref(), &request.text).await?;

    Ok(Json(SimplifyResponse {
        simplification: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/plan
///
/// Builds a week-by-week study plan for the given topics and target date.
pub async fn handle_study_plan(
    State(state): State<AppState>,
    Json(request): Json<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let topics: Vec<String> = request
        .topics
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if topics.is_empty() {
        return Err(AppError::Validation(
            "at least one topic is required".to_string(),
        ));
    }

    let weeks_available = advisory_weeks(request.target_date, Utc::now().date_naive());

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = generate_study_plan(
        &state.ai,
        api_key.as_deref(),
        &topics,
        request.target_date,
        weeks_available,
    )
    .await?;

    Ok(Json(StudyPlanResponse {
        weeks_available,
        plan: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/chat
///
/// One free-text exchange with the tutor persona. Stateless: each request
/// carries only the current message, no conversation history.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = chat_reply(&state.ai, api_key.as_deref(), &request.message).await?;

    Ok(Json(ChatResponse {
        reply: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/quiz
///
/// Generates a multiple-choice quiz from source text. The quiz is returned
/// for taking, not persisted; completed runs are saved via /api/v1/quizzes.
pub async fn handle_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = generate_quiz(&state.ai, api_key.as_deref(), &request.text).await?;

    Ok(Json(QuizResponse {
        quiz: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/flashcards
///
/// Generates front/back flashcards from source text.
pub async fn handle_flashcards(
    State(state): State<AppState>,
    Json(request): Json<FlashcardsRequest>,
) -> Result<Json<FlashcardsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = generate_flashcards(&state.ai, api_key.as_deref(), &request.text).await?;

    Ok(Json(FlashcardsResponse {
        cards: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/solve
///
/// Solves a problem with numbered steps, concepts and tips.
pub async fn handle_solve(
    State(state): State<AppState>,
    Json(request): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, AppError> {
    if request.problem.trim().is_empty() {
        return Err(AppError::Validation("problem cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = solve_step_by_step(&state.ai, api_key.as_deref(), &request.problem).await?;

    Ok(Json(SolveResponse {
        solution: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

/// POST /api/v1/tutor/careers
///
/// Explores career paths related to a concept or subject.
pub async fn handle_careers(
    State(state): State<AppState>,
    Json(request): Json<CareersRequest>,
) -> Result<Json<CareersResponse>, AppError> {
    if request.concept.trim().is_empty() {
        return Err(AppError::Validation("concept cannot be empty".to_string()));
    }

    let api_key = state.credentials.resolve(request.user_id).await?;
    let outcome = explore_career_paths(&state.ai, api_key.as_deref(), &request.concept).await?;

    Ok(Json(CareersResponse {
        exploration: outcome.value,
        provenance: outcome.provenance,
        notice: outcome.notice,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Credential handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/credentials?user_id=...
///
/// Returns the user's stored key and whether AI calls are possible.
pub async fn handle_credential_status(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<CredentialStatusResponse>, AppError> {
    let api_key = state.credentials.stored(query.user_id).await?;
    let ready = api_key.is_some() || state.credentials.has_default();

    Ok(Json(CredentialStatusResponse { api_key, ready }))
}

/// PUT /api/v1/credentials
///
/// Stores or replaces the user's Gemini API key. Presence is the only
/// validation; the key's worth is proven by the first model call.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Json(request): Json<SetCredentialRequest>,
) -> Result<StatusCode, AppError> {
    if request.api_key.trim().is_empty() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    state
        .credentials
        .set(request.user_id, &request.api_key)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/credentials?user_id=...
///
/// Removes the user's stored key. AI calls fall back to the service-wide
/// default if one is configured, otherwise they are refused.
pub async fn handle_clear_credential(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    state.credentials.clear(query.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
