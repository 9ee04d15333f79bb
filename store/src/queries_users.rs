//! User queries.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::UserRow;
use artisthub_core::{User, UserId};
use chrono::{DateTime, Utc};

impl Database {
    /// Create or refresh a user by email.
    ///
    /// The upsert key is the unique email column; the login flow calls this
    /// on every OAuth callback so the display name tracks the identity
    /// provider. New users get the `artist` role.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write or the read-back fails.
    pub async fn upsert_user_by_email(
        &self,
        email: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        sqlx::query(
            "INSERT INTO users (email, name, role, created_at, updated_at) \
             VALUES (?, ?, 'artist', ?, ?) \
             ON CONFLICT(email) DO UPDATE SET name = excluded.name, updated_at = excluded.updated_at",
        )
        .bind(email)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool())
            .await?;

        Ok(row.into())
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.0)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use artisthub_core::Role;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_name() {
        let db = test_db().await;
        let now = Utc::now();

        let created = db
            .upsert_user_by_email("dana@example.com", "Dana", now)
            .await
            .unwrap();
        assert_eq!(created.email, "dana@example.com");
        assert_eq!(created.name, "Dana");
        assert_eq!(created.role, Role::Artist);

        let updated = db
            .upsert_user_by_email("dana@example.com", "Dana Levi", now)
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Dana Levi");
    }

    #[tokio::test]
    async fn get_user_missing_is_none() {
        let db = test_db().await;
        assert!(db.get_user(UserId(42)).await.unwrap().is_none());
    }
}
