//! Authentication error types.

use artisthub_store::StoreError;
use thiserror::Error;

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════════════
    /// No valid session for the presented credentials.
    ///
    /// Covers a missing cookie, an unknown token, an expired session and a
    /// deleted user alike. The specific cause is logged at debug level but
    /// never returned to the caller.
    #[error("Authentication required")]
    Unauthenticated,

    /// The Google account's email address is not verified.
    #[error("Email address not verified")]
    EmailNotVerified,

    // ═══════════════════════════════════════════════════════════════════
    // OAuth Flow Errors
    // ═══════════════════════════════════════════════════════════════════
    /// The `state` parameter returned by the provider does not match the
    /// one issued at login.
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// Building the provider authorization URL failed.
    #[error("Failed to build authorization URL: {0}")]
    AuthorizationUrl(String),

    /// Exchanging the authorization code for tokens failed.
    #[error("OAuth token exchange failed: {0}")]
    TokenExchange(String),

    /// Fetching the user profile from the provider failed.
    #[error("OAuth user info fetch failed: {0}")]
    UserInfo(String),

    // ═══════════════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════════════
    /// Database failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Check if this error was caused by the caller rather than the system.
    ///
    /// # Example
    ///
    /// ```
    /// use artisthub_auth::AuthError;
    ///
    /// assert!(AuthError::Unauthenticated.is_user_error());
    /// assert!(!AuthError::TokenExchange("timeout".to_string()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::EmailNotVerified | Self::StateMismatch
        )
    }

    /// Check if this error came from the OAuth provider side.
    ///
    /// # Example
    ///
    /// ```
    /// use artisthub_auth::AuthError;
    ///
    /// assert!(AuthError::UserInfo("503".to_string()).is_upstream_failure());
    /// assert!(!AuthError::StateMismatch.is_upstream_failure());
    /// ```
    #[must_use]
    pub const fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::TokenExchange(_) | Self::UserInfo(_))
    }
}
