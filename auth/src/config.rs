//! Authentication configuration.

use chrono::Duration;

/// Cookie names used by the login flow.
pub mod cookies {
    /// Session token cookie, set after a successful login.
    pub const SESSION: &str = "session_token";

    /// Short-lived CSRF state cookie, set when redirecting to Google.
    pub const OAUTH_STATE: &str = "oauth_state";
}

/// OAuth login configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Redirect URI registered with Google (e.g.
    /// "<http://localhost:8000/auth/callback>").
    pub redirect_uri: String,

    /// CSRF state time-to-live in minutes.
    ///
    /// Default: 5 minutes
    pub state_ttl_minutes: i64,

    /// Session duration after successful authentication.
    ///
    /// Default: 1 hour
    pub session_duration: Duration,
}

impl AuthConfig {
    /// Create new OAuth login configuration.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - Callback URL registered with Google
    #[must_use]
    pub const fn new(redirect_uri: String) -> Self {
        Self {
            redirect_uri,
            state_ttl_minutes: 5,
            session_duration: Duration::hours(1),
        }
    }

    /// Set CSRF state time-to-live.
    #[must_use]
    pub const fn with_state_ttl(mut self, minutes: i64) -> Self {
        self.state_ttl_minutes = minutes;
        self
    }

    /// Set session duration.
    #[must_use]
    pub const fn with_session_duration(mut self, duration: Duration) -> Self {
        self.session_duration = duration;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            redirect_uri: "http://localhost:8000/auth/callback".to_string(),
            state_ttl_minutes: 5,
            session_duration: Duration::hours(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = AuthConfig::new("https://example.com/auth/callback".to_string())
            .with_state_ttl(10)
            .with_session_duration(Duration::hours(12));

        assert_eq!(config.redirect_uri, "https://example.com/auth/callback");
        assert_eq!(config.state_ttl_minutes, 10);
        assert_eq!(config.session_duration, Duration::hours(12));
    }

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.redirect_uri, "http://localhost:8000/auth/callback");
        assert_eq!(config.state_ttl_minutes, 5);
        assert_eq!(config.session_duration, Duration::hours(1));
    }

    #[test]
    fn test_cookie_names() {
        assert_eq!(cookies::SESSION, "session_token");
        assert_eq!(cookies::OAUTH_STATE, "oauth_state");
    }
}
