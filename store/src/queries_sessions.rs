//! Session queries.
//!
//! The session row is the sole authority behind a session token: the
//! token carries no meaning of its own, so deleting the row on logout
//! revokes it immediately and expiry is decided by the row's
//! `expires_at` alone.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::SessionRow;
use artisthub_core::{Session, UserId};
use chrono::{DateTime, Utc};

impl Database {
    /// Persist a session for a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails; a token collision
    /// surfaces as [`StoreError::UniqueViolation`].
    pub async fn insert_session(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Session, StoreError> {
        let result = sqlx::query(
            "INSERT INTO user_sessions (user_id, token, expires_at, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id.0)
        .bind(token)
        .bind(expires_at)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(Session {
            id: artisthub_core::SessionId(result.last_insert_rowid()),
            user_id,
            token: token.to_string(),
            expires_at,
            created_at: now,
        })
    }

    /// Look up a still-valid session by its token.
    ///
    /// Expired rows are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn get_valid_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT * FROM user_sessions WHERE token = ? AND expires_at > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete the session for a token, if any.
    ///
    /// Returns `true` if a row was deleted. Logout calls this and succeeds
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete fails.
    pub async fn delete_session_by_token(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sweep expired sessions. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete fails.
    pub async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }
}
