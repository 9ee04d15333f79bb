//! Public artist profile view.

use super::profile::ProfileResponse;
use crate::server::state::AppState;
use artisthub_auth::OAuth2Provider;
use artisthub_core::UserId;
use artisthub_notify::BookingNotifier;
use artisthub_web::AppError;
use axum::{
    extract::{Path, State},
    Json,
};

/// Public profile of an artist, by user id. No authentication.
///
/// Unlike `/profile/me`, an artist who never saved a profile is simply
/// not bookable and answers 404 here.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/public/artist/1
/// ```
///
/// # Errors
///
/// Returns 404 `"Artist not found"` when no profile exists.
pub async fn artist_profile<P, N>(
    State(state): State<AppState<P, N>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let Some(profile) = state.db.get_profile(UserId(user_id)).await? else {
        return Err(AppError::not_found("Artist not found"));
    };
    Ok(Json(ProfileResponse::from_profile(profile)))
}
