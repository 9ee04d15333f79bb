//! Artist profile endpoints.
//!
//! Profiles are created lazily: `GET /profile/me` answers with an empty
//! view until the first `PUT /profile/me`, which creates the row and
//! applies only the fields the caller supplied.

use crate::auth::middleware::SessionUser;
use crate::server::state::AppState;
use artisthub_auth::OAuth2Provider;
use artisthub_core::{ArtistProfile, SocialLinks, UserId};
use artisthub_notify::BookingNotifier;
use artisthub_web::AppError;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// An artist profile, as exposed on the wire.
///
/// Unset fields render as empty strings (or zero for the price) rather
/// than nulls, so a profile that was never saved looks the same as one
/// saved empty.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Owning user id.
    pub user_id: UserId,
    /// Public stage name.
    pub stage_name: String,
    /// Free-text biography.
    pub bio: String,
    /// Genre tags.
    pub genres: Vec<String>,
    /// Social media links.
    pub social_links: SocialLinks,
    /// Minimum acceptable booking budget.
    pub min_price: f64,
    /// Currency code for `min_price`.
    pub currency: String,
    /// Photo reference.
    pub photo: String,
}

impl ProfileResponse {
    /// Wire view of a stored profile.
    #[must_use]
    pub fn from_profile(profile: ArtistProfile) -> Self {
        Self {
            user_id: profile.user_id,
            stage_name: profile.stage_name.unwrap_or_default(),
            bio: profile.bio.unwrap_or_default(),
            genres: profile.genres,
            social_links: profile.social_links,
            min_price: profile.min_price.unwrap_or_default(),
            currency: profile.currency.unwrap_or_default(),
            photo: profile.photo.unwrap_or_default(),
        }
    }

    /// Wire view for an artist who has not saved a profile yet.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            stage_name: String::new(),
            bio: String::new(),
            genres: Vec::new(),
            social_links: SocialLinks::default(),
            min_price: 0.0,
            currency: String::new(),
            photo: String::new(),
        }
    }
}

/// Partial profile edit; `None` leaves the field untouched.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    /// New stage name.
    #[serde(default)]
    pub stage_name: Option<String>,
    /// New biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// New genre tags.
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// New social links; replaces the whole set.
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    /// New minimum price.
    #[serde(default)]
    pub min_price: Option<f64>,
    /// New currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// New photo reference.
    #[serde(default)]
    pub photo: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// The caller's own profile.
///
/// Never 404s: an artist without a saved profile gets the empty view.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/profile/me --cookie "session_token=<token>"
/// ```
///
/// # Errors
///
/// Returns 401 without a live session.
pub async fn my_profile<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
) -> Result<Json<ProfileResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let response = match state.db.get_profile(user.id).await? {
        Some(profile) => ProfileResponse::from_profile(profile),
        None => ProfileResponse::empty(user.id),
    };
    Ok(Json(response))
}

/// Update the caller's profile, creating it on first write.
///
/// Only the supplied fields change; everything else keeps its stored
/// value.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:8000/profile/me \
///   --cookie "session_token=<token>" \
///   -H "Content-Type: application/json" \
///   -d '{"stage_name": "DJ Nova", "min_price": 500.0, "genres": ["jazz", "funk"]}'
/// ```
///
/// # Errors
///
/// Returns 401 without a live session, 422 for a malformed body
/// (including unknown social link platforms).
pub async fn update_my_profile<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Json(update): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let now = Utc::now();
    let mut profile = state
        .db
        .get_profile(user.id)
        .await?
        .unwrap_or_else(|| blank_profile(user.id, now));

    if let Some(stage_name) = update.stage_name {
        profile.stage_name = Some(stage_name);
    }
    if let Some(bio) = update.bio {
        profile.bio = Some(bio);
    }
    if let Some(genres) = update.genres {
        profile.genres = genres;
    }
    if let Some(social_links) = update.social_links {
        profile.social_links = social_links;
    }
    if let Some(min_price) = update.min_price {
        profile.min_price = Some(min_price);
    }
    if let Some(currency) = update.currency {
        profile.currency = Some(currency);
    }
    if let Some(photo) = update.photo {
        profile.photo = Some(photo);
    }

    let saved = state.db.save_profile(&profile, now).await?;
    tracing::info!(user_id = %user.id, "artist profile saved");
    Ok(Json(ProfileResponse::from_profile(saved)))
}

/// A profile row that has never been saved, ready to receive edits.
fn blank_profile(user_id: UserId, now: DateTime<Utc>) -> ArtistProfile {
    ArtistProfile {
        user_id,
        stage_name: None,
        bio: None,
        genres: Vec::new(),
        social_links: SocialLinks::default(),
        min_price: None,
        currency: None,
        photo: None,
        created_at: now,
        updated_at: now,
    }
}
