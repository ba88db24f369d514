use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Connects to PostgreSQL and verifies the connection with a round trip.
///
/// Schema management lives outside this service; the pool assumes the
/// `notes`, `quizzes`, `flashcards`, `user_stats` and `api_credentials`
/// tables already exist.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("PostgreSQL connectivity check failed")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
