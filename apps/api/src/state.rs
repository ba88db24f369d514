use sqlx::PgPool;

use crate::ai::{AiClient, CredentialStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The single client behind every tutor capability.
    pub ai: AiClient,
    /// Per-user Gemini keys plus the optional service-wide default.
    pub credentials: CredentialStore,
}
