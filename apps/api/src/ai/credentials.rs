//! Per-user API credential storage.
//!
//! Keys are supplied by users and kept in the `api_credentials` table; an
//! optional service-wide default can be configured through the environment.
//! There is no compiled-in key and no process-global credential state —
//! the store is constructed once at startup and passed to whoever needs it.

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CredentialStore {
    pool: PgPool,
    default_key: Option<String>,
}

impl CredentialStore {
    pub fn new(pool: PgPool, default_key: Option<String>) -> Self {
        Self { pool, default_key }
    }

    /// Stores (or replaces) a user's API key. The key is held verbatim
    /// apart from whitespace trimming; no format validation is attempted.
    pub async fn set(&self, user_id: Uuid, api_key: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO api_credentials (user_id, api_key, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET api_key = EXCLUDED.api_key, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(api_key.trim())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a user's stored key. Clearing a key that was never stored
    /// is not an error.
    pub async fn clear(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM api_credentials WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the key the user stored, if any. Does not consult the
    /// service-wide default.
    pub async fn stored(&self, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT api_key FROM api_credentials WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Resolves the key an AI call should use for this user: their stored
    /// key when present, otherwise the service-wide default, otherwise
    /// nothing (the caller must refuse to invoke the model).
    pub async fn resolve(&self, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
        let stored = self.stored(user_id).await?;
        Ok(effective_key(stored, self.default_key.as_deref()))
    }

    /// Whether a service-wide default key is configured.
    pub fn has_default(&self) -> bool {
        self.default_key.is_some()
    }
}

/// A key the user stored themselves always wins over the service default.
fn effective_key(stored: Option<String>, default_key: Option<&str>) -> Option<String> {
    stored.or_else(|| default_key.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_key_wins_over_default() {
        let key = effective_key(Some("user-key".to_string()), Some("service-key"));
        assert_eq!(key.as_deref(), Some("user-key"));
    }

    #[test]
    fn test_default_fills_in_when_nothing_stored() {
        let key = effective_key(None, Some("service-key"));
        assert_eq!(key.as_deref(), Some("service-key"));
    }

    #[test]
    fn test_no_key_resolves_to_none() {
        assert_eq!(effective_key(None, None), None);
    }
}
