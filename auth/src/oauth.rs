//! Google OAuth 2.0 client.
//!
//! The [`OAuth2Provider`] trait abstracts the three provider round trips a
//! login needs so handlers can be tested against [`crate::mocks`] without
//! talking to Google.

use crate::error::{AuthError, Result};
use reqwest::Client;
use serde::Deserialize;

/// OAuth2/OIDC provider.
pub trait OAuth2Provider: Send + Sync {
    /// Build the authorization URL the browser is redirected to.
    ///
    /// # Errors
    ///
    /// Returns error if URL construction fails.
    fn build_authorization_url(
        &self,
        state: &str,
        redirect_uri: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Provider rejects the code
    /// - Response is malformed
    fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> impl std::future::Future<Output = Result<OAuthTokenResponse>> + Send;

    /// Fetch the authenticated user's profile from the provider.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Token is invalid
    /// - The account's email is not verified
    fn fetch_user_info(
        &self,
        access_token: &str,
    ) -> impl std::future::Future<Output = Result<OAuthUserInfo>> + Send;
}

/// OAuth token response.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthTokenResponse {
    /// Access token.
    pub access_token: String,

    /// Expiration timestamp (if provided).
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Provider-reported user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthUserInfo {
    /// Stable provider-side user identifier.
    pub provider_user_id: String,

    /// Email address.
    pub email: String,

    /// Full name.
    pub name: Option<String>,

    /// Profile picture URL.
    pub picture: Option<String>,
}

/// Compare the callback `state` against the value issued at login.
///
/// # Errors
///
/// Returns [`AuthError::StateMismatch`] if they differ.
pub fn verify_state(expected: &str, presented: &str) -> Result<()> {
    // Constant-time comparison: response time must not leak where the
    // mismatch occurred.
    if !constant_time_eq::constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
        tracing::warn!("OAuth state mismatch");
        return Err(AuthError::StateMismatch);
    }
    Ok(())
}

/// Google OAuth 2.0 provider.
///
/// # Configuration
///
/// To use Google OAuth:
///
/// 1. Create OAuth 2.0 credentials in Google Cloud Console
/// 2. Configure authorized redirect URIs
/// 3. Set environment variables:
///    - `GOOGLE_CLIENT_ID`
///    - `GOOGLE_CLIENT_SECRET`
#[derive(Clone, Debug)]
pub struct GoogleOAuthProvider {
    /// OAuth 2.0 client ID from Google Cloud Console.
    client_id: String,

    /// OAuth 2.0 client secret (keep confidential).
    client_secret: String,

    /// HTTP client for making requests.
    http_client: Client,

    /// Scopes to request (default: "openid email profile").
    scopes: Vec<String>,
}

impl GoogleOAuthProvider {
    /// Create a new Google OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `client_id` - OAuth 2.0 client ID from Google Cloud Console
    /// * `client_secret` - OAuth 2.0 client secret
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            http_client: Client::new(),
            scopes: vec![
                "openid".to_string(),
                "email".to_string(),
                "profile".to_string(),
            ],
        }
    }

    /// Set custom scopes.
    ///
    /// Default scopes are: `openid email profile`
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

impl OAuth2Provider for GoogleOAuthProvider {
    async fn build_authorization_url(&self, state: &str, redirect_uri: &str) -> Result<String> {
        let scope = self.scopes.join(" ");
        let params = [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state),
        ];

        let query = serde_urlencoded::to_string(&params)
            .map_err(|e| AuthError::AuthorizationUrl(e.to_string()))?;

        Ok(format!(
            "https://accounts.google.com/o/oauth2/v2/auth?{query}"
        ))
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<OAuthTokenResponse> {
        let params = [
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!("Google token exchange failed: {}", error_body);
            return Err(AuthError::TokenExchange("Token exchange failed".to_string()));
        }

        let google_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let expires_at = google_response.expires_in.map(|expires_in| {
            chrono::Utc::now() + chrono::Duration::seconds(i64::from(expires_in))
        });

        Ok(OAuthTokenResponse {
            access_token: google_response.access_token,
            expires_at,
        })
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<OAuthUserInfo> {
        let response = self
            .http_client
            .get("https://openidconnect.googleapis.com/v1/userinfo")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::UserInfo(e.to_string()))?;

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!("Google UserInfo request failed: {}", error_body);
            return Err(AuthError::UserInfo("UserInfo fetch failed".to_string()));
        }

        let google_user: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| AuthError::UserInfo(e.to_string()))?;

        if !google_user.email_verified {
            tracing::warn!("Google user email not verified: {}", google_user.email);
            return Err(AuthError::EmailNotVerified);
        }

        Ok(OAuthUserInfo {
            provider_user_id: google_user.sub,
            email: google_user.email,
            name: google_user.name,
            picture: google_user.picture,
        })
    }
}

/// Google's token endpoint response format.
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    /// Access token for API requests.
    access_token: String,

    /// Token expiration in seconds (typically 3600 = 1 hour).
    expires_in: Option<u32>,

    /// Token type (always "Bearer").
    #[allow(dead_code)]
    token_type: String,
}

/// Google's UserInfo endpoint response format.
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    /// Google user ID (stable, unique identifier).
    sub: String,

    /// Full name.
    name: Option<String>,

    /// Profile picture URL.
    picture: Option<String>,

    /// Email address.
    email: String,

    /// Whether email is verified by Google.
    email_verified: bool,
}
