//! Booking lifecycle endpoints.
//!
//! Creation is anonymous (the client is identified by the contact block
//! in the body); everything else is scoped to the owning artist's
//! session, except the chat-token detail view for the anonymous booker.

use crate::auth::middleware::SessionUser;
use crate::server::state::AppState;
use artisthub_auth::OAuth2Provider;
use artisthub_core::{BookingId, BookingRequest, BookingUpdate, NewBookingRequest, UserId};
use artisthub_notify::BookingNotifier;
use artisthub_web::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameter naming the artist a booking targets.
#[derive(Debug, Deserialize)]
pub struct CreateBookingQuery {
    /// The artist's user id.
    pub artist_id: i64,
}

/// Query parameter carrying the anonymous booker's credential.
#[derive(Debug, Deserialize)]
pub struct ChatTokenQuery {
    /// Per-booking chat token from the confirmation email.
    pub chat_token: String,
}

/// Target status for a status update.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// One of `accepted`, `rejected`, `cancelled`.
    pub status: String,
}

/// Booking details plus the artist's display name, for the anonymous
/// chat page.
#[derive(Debug, Serialize)]
pub struct BookingChatResponse {
    /// The booking itself.
    #[serde(flatten)]
    pub booking: BookingRequest,
    /// Artist display name: stage name when set, user name otherwise.
    pub artist_stage_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a booking request against an artist.
///
/// Anonymous; the artist is named by the `artist_id` query parameter.
/// On success the booking is `pending`, the client's message (if any)
/// seeds the chat, and a confirmation email goes out best-effort.
///
/// # Example
///
/// ```bash
/// curl -X POST "http://localhost:8000/bookings?artist_id=1" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "event_date": "2025-06-01",
///     "event_time": "19:30",
///     "time_zone": "Europe/Berlin",
///     "budget": 800.0,
///     "currency": "USD",
///     "venue_name": "City Hall",
///     "city": "Berlin",
///     "country": "DE",
///     "performance_duration": 90,
///     "participant_count": 150,
///     "client_first_name": "Dana",
///     "client_last_name": "Levi",
///     "client_email": "dana@example.com"
///   }'
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown artist, 400 for a malformed or non-future
/// date, a malformed time, or a budget under the artist's minimum, and
/// 409 when the slot is blocked or already booked.
pub async fn create_booking<P, N>(
    State(state): State<AppState<P, N>>,
    Query(query): Query<CreateBookingQuery>,
    Json(request): Json<NewBookingRequest>,
) -> Result<(StatusCode, Json<BookingRequest>), AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let booking = state
        .bookings
        .create(UserId(query.artist_id), request)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// A single booking, for the owning artist or the matching client email.
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown id, 403 when the
/// caller is neither party.
pub async fn get_booking<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<BookingRequest>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let booking = state.bookings.get(BookingId(id), &user).await?;
    Ok(Json(booking))
}

/// All bookings for an artist, newest event first. Self only.
///
/// # Errors
///
/// Returns 401 without a session, 403 when asking for another artist's
/// list.
pub async fn artist_bookings<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(artist_id): Path<i64>,
) -> Result<Json<Vec<BookingRequest>>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let bookings = state
        .bookings
        .list_for_artist(UserId(artist_id), &user)
        .await?;
    Ok(Json(bookings))
}

/// Edit a booking's event fields. Owner only.
///
/// # Errors
///
/// Returns 401/404/403 as usual, 400 for unparseable date or time text.
pub async fn update_booking<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(update): Json<BookingUpdate>,
) -> Result<Json<BookingRequest>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let booking = state.bookings.update(BookingId(id), &user, update).await?;
    Ok(Json(booking))
}

/// Move a booking to `accepted`, `rejected` or `cancelled`. Owner only.
///
/// Re-submitting the current status is an idempotent no-op.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:8000/bookings/1/status \
///   --cookie "session_token=<token>" \
///   -H "Content-Type: application/json" \
///   -d '{"status": "accepted"}'
/// ```
///
/// # Errors
///
/// Returns 401/404/403 as usual, 400 for an unknown target status or a
/// transition the state machine forbids.
pub async fn update_booking_status<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<BookingRequest>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let booking = state
        .bookings
        .update_status(BookingId(id), &user, &request.status)
        .await?;
    Ok(Json(booking))
}

/// Cancel a booking. Owner only; allowed from `pending` and `accepted`.
///
/// The row survives as `cancelled`; the slot reopens.
///
/// # Errors
///
/// Returns 401/404/403 as usual, 400 from a terminal status.
pub async fn cancel_booking<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    state.bookings.cancel(BookingId(id), &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Booking details for the anonymous booker, by chat token.
///
/// Adds the artist's display name so the chat page can render a header
/// without a second request.
///
/// # Errors
///
/// Returns 404 when the booking does not exist or the token does not
/// match it; the two cases are indistinguishable on the wire.
pub async fn booking_for_booker<P, N>(
    State(state): State<AppState<P, N>>,
    Path(id): Path<i64>,
    Query(query): Query<ChatTokenQuery>,
) -> Result<Json<BookingChatResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let view = state
        .bookings
        .get_by_chat_token(BookingId(id), &query.chat_token)
        .await?;
    Ok(Json(BookingChatResponse {
        booking: view.booking,
        artist_stage_name: view.artist_name,
    }))
}
