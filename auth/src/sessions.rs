//! Session lifecycle.
//!
//! A login upserts the user row and mints an opaque session token; every
//! authenticated request resolves its cookie back to a user through the
//! sessions table. All resolution failures collapse into
//! [`AuthError::Unauthenticated`] so responses never reveal whether a
//! token was unknown, expired or orphaned.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::oauth::OAuthUserInfo;
use crate::tokens::generate_token;
use artisthub_core::User;
use artisthub_store::Database;
use chrono::Utc;

/// Session service.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct SessionService {
    db: Database,
    config: AuthConfig,
}

impl SessionService {
    /// Create a session service over a database.
    #[must_use]
    pub const fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Authentication configuration.
    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Log in a user whose identity was established by the OAuth provider.
    ///
    /// Creates the user on first login, updates the stored name on
    /// subsequent ones, and mints a fresh session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the database rejects the writes.
    pub async fn login(&self, user_info: &OAuthUserInfo) -> Result<(User, String)> {
        let now = Utc::now();
        let user = self
            .db
            .upsert_user_by_email(
                &user_info.email,
                user_info.name.as_deref().unwrap_or_default(),
                now,
            )
            .await?;

        let token = generate_token();
        let expires_at = now + self.config.session_duration;
        self.db
            .insert_session(user.id, &token, expires_at, now)
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok((user, token))
    }

    /// Resolve a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] for any token that does not
    /// map to a live session and user.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let now = Utc::now();
        let Some(session) = self.db.get_valid_session(token, now).await? else {
            tracing::debug!("session token unknown or expired");
            return Err(AuthError::Unauthenticated);
        };

        let Some(user) = self.db.get_user(session.user_id).await? else {
            tracing::debug!(user_id = %session.user_id, "session user no longer exists");
            return Err(AuthError::Unauthenticated);
        };

        Ok(user)
    }

    /// Invalidate a session token.
    ///
    /// Succeeds whether or not the token had a live session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the delete fails.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let deleted = self.db.delete_session_by_token(token).await?;
        if deleted {
            tracing::info!("session terminated");
        }
        Ok(())
    }

    /// Remove expired session rows.
    ///
    /// Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the delete fails.
    pub async fn purge_expired(&self) -> Result<u64> {
        let purged = self.db.delete_expired_sessions(Utc::now()).await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions removed");
        }
        Ok(purged)
    }
}
