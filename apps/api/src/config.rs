use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// `GEMINI_API_KEY` is deliberately optional: it is only a service-wide
/// default, and every AI capability also accepts a per-user key stored
/// through the credentials endpoint. There is no compiled-in key.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| crate::ai::DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating a set-but-blank value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
