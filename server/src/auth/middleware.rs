//! Session extractor.
//!
//! Handlers that take a [`SessionUser`] parameter require a live session:
//! the extractor reads the session cookie and resolves it through
//! [`SessionService`], rejecting with 401 when the cookie is missing,
//! unknown or expired.

use crate::auth::cookies;
use artisthub_auth::{AuthError, SessionService};
use artisthub_core::User;
use artisthub_web::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

/// The authenticated user, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    SessionService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token =
            cookies::session_value(&parts.headers).ok_or(AuthError::Unauthenticated)?;

        let sessions = SessionService::from_ref(state);
        let user = sessions.authenticate(&token).await?;
        Ok(Self(user))
    }
}
