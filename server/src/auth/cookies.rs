//! Cookie formatting and parsing for the login flow.
//!
//! Two cookies, both HTTP-only with `SameSite=Lax`: the session token set
//! at callback time and the short-lived CSRF state set at login time.
//! Clearing is a `Max-Age=0` rewrite of the same cookie.

use artisthub_auth::cookies::{OAUTH_STATE, SESSION};
use axum::http::{header, HeaderMap};

/// `Set-Cookie` value installing the session token.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    build(SESSION, token, max_age_secs)
}

/// `Set-Cookie` value clearing the session token.
#[must_use]
pub fn clear_session_cookie() -> String {
    build(SESSION, "", 0)
}

/// `Set-Cookie` value installing the OAuth CSRF state.
#[must_use]
pub fn state_cookie(state: &str, max_age_secs: i64) -> String {
    build(OAUTH_STATE, state, max_age_secs)
}

/// `Set-Cookie` value clearing the OAuth CSRF state.
#[must_use]
pub fn clear_state_cookie() -> String {
    build(OAUTH_STATE, "", 0)
}

/// The session token presented by the request, if any.
#[must_use]
pub fn session_value(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION)
}

/// The OAuth CSRF state presented by the request, if any.
#[must_use]
pub fn oauth_state_value(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, OAUTH_STATE)
}

fn build(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; HttpOnly; Path=/; Max-Age={max_age_secs}; SameSite=Lax")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
