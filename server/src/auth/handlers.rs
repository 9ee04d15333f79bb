//! Google OAuth login flow handlers.
//!
//! The flow follows the standard authorization-code dance with a CSRF
//! state cookie:
//!
//! 1. `GET /auth/login` mints a random state, stores it in a short-lived
//!    cookie, and redirects to the provider's authorization URL.
//! 2. `GET /auth/callback` verifies the state round trip, exchanges the
//!    code, fetches the user's profile, upserts the user, mints a session
//!    token, and redirects to the frontend dashboard with the session
//!    cookie set.
//! 3. `GET /auth/me` resolves the cookie; `POST /auth/logout` deletes the
//!    session row and clears it.

use crate::auth::cookies;
use crate::auth::middleware::SessionUser;
use crate::server::state::AppState;
use artisthub_auth::{generate_token, verify_state, AuthError, OAuth2Provider};
use artisthub_core::{Role, User, UserId};
use artisthub_notify::BookingNotifier;
use artisthub_web::AppError;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters Google sends back to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for tokens.
    pub code: String,
    /// CSRF state echoed back by the provider.
    pub state: String,
}

/// The authenticated user, as exposed on the wire.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User id.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role (`artist` or `admin`).
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Response after logging out.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true; logout is idempotent.
    pub success: bool,
    /// Confirmation message.
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Start the login flow.
///
/// Redirects (307) to the provider's authorization URL with a freshly
/// minted CSRF state, which is also stored in a short-lived HTTP-only
/// cookie for the callback to verify.
///
/// # Errors
///
/// Returns 500 if the authorization URL cannot be built.
pub async fn login<P, N>(
    State(state): State<AppState<P, N>>,
) -> Result<impl IntoResponse, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let oauth_state = generate_token();
    let config = state.sessions.config();
    let url = state
        .oauth
        .build_authorization_url(&oauth_state, &config.redirect_uri)
        .await?;

    let max_age = config.state_ttl_minutes * 60;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookies::state_cookie(&oauth_state, max_age))]),
        Redirect::temporary(&url),
    ))
}

/// Complete the login flow.
///
/// Verifies the CSRF state against the login cookie, exchanges the code,
/// fetches the user's profile, and logs the user in. On success the
/// session cookie is set, the state cookie cleared, and the browser
/// redirected (307) to the frontend dashboard.
///
/// # Errors
///
/// Returns 401 when the state does not round-trip or the provider
/// rejects the exchange.
pub async fn callback<P, N>(
    State(state): State<AppState<P, N>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let expected = cookies::oauth_state_value(&headers).ok_or(AuthError::StateMismatch)?;
    verify_state(&expected, &query.state)?;

    let config = state.sessions.config();
    let tokens = state
        .oauth
        .exchange_code(&query.code, &config.redirect_uri)
        .await?;
    let user_info = state.oauth.fetch_user_info(&tokens.access_token).await?;

    let (user, token) = state.sessions.login(&user_info).await?;
    tracing::debug!(user_id = %user.id, "login callback complete");

    let max_age = config.session_duration.num_seconds();
    let dashboard = format!("{}/dashboard", state.frontend_url);
    Ok((
        AppendHeaders([
            (header::SET_COOKIE, cookies::session_cookie(&token, max_age)),
            (header::SET_COOKIE, cookies::clear_state_cookie()),
        ]),
        Redirect::temporary(&dashboard),
    ))
}

/// The currently authenticated user.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/auth/me --cookie "session_token=<token>"
/// # {"id":1,"email":"dj@example.com","name":"DJ Example","role":"artist"}
/// ```
pub async fn me(SessionUser(user): SessionUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Log out and clear the session cookie.
///
/// Idempotent: succeeds with or without a live session.
///
/// # Errors
///
/// Returns 500 only if the session delete itself fails.
pub async fn logout<P, N>(
    State(state): State<AppState<P, N>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    if let Some(token) = cookies::session_value(&headers) {
        state.sessions.logout(&token).await?;
    }

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookies::clear_session_cookie())]),
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}
