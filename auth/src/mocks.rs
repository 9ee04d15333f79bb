//! Mock OAuth provider for testing.

use crate::error::{AuthError, Result};
use crate::oauth::{OAuth2Provider, OAuthTokenResponse, OAuthUserInfo};
use std::future::Future;

/// Mock OAuth provider.
///
/// Returns predefined responses so login handlers can be exercised
/// without network access.
#[derive(Debug, Clone)]
pub struct MockOAuth2Provider {
    /// Whether to simulate success or failure.
    pub should_succeed: bool,

    /// Email reported by `fetch_user_info`.
    pub email: String,

    /// Name reported by `fetch_user_info`.
    pub name: Option<String>,
}

impl MockOAuth2Provider {
    /// Create a mock provider that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            should_succeed: true,
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        }
    }

    /// Create a mock that fails every request.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            ..Self::new()
        }
    }

    /// Set the email the mock reports.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    /// Set the name the mock reports.
    #[must_use]
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(ToString::to_string);
        self
    }
}

impl Default for MockOAuth2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuth2Provider for MockOAuth2Provider {
    fn build_authorization_url(
        &self,
        state: &str,
        redirect_uri: &str,
    ) -> impl Future<Output = Result<String>> + Send {
        let should_succeed = self.should_succeed;
        let state = state.to_string();
        let redirect_uri = redirect_uri.to_string();

        async move {
            if !should_succeed {
                return Err(AuthError::AuthorizationUrl("mock failure".to_string()));
            }

            Ok(format!(
                "https://oauth.invalid/authorize?state={state}&redirect_uri={redirect_uri}"
            ))
        }
    }

    fn exchange_code(
        &self,
        _code: &str,
        _redirect_uri: &str,
    ) -> impl Future<Output = Result<OAuthTokenResponse>> + Send {
        let should_succeed = self.should_succeed;

        async move {
            if !should_succeed {
                return Err(AuthError::TokenExchange("mock failure".to_string()));
            }

            Ok(OAuthTokenResponse {
                access_token: "mock_access_token_123".to_string(),
                expires_at: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
            })
        }
    }

    fn fetch_user_info(&self, _access_token: &str) -> impl Future<Output = Result<OAuthUserInfo>> + Send {
        let should_succeed = self.should_succeed;
        let email = self.email.clone();
        let name = self.name.clone();

        async move {
            if !should_succeed {
                return Err(AuthError::UserInfo("mock failure".to_string()));
            }

            Ok(OAuthUserInfo {
                provider_user_id: "mock_user_123".to_string(),
                email,
                name,
                picture: None,
            })
        }
    }
}
