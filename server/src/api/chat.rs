//! Per-booking chat endpoints.
//!
//! Both parties share one message log per booking. The artist
//! authenticates with the session cookie and must own the booking; the
//! anonymous booker presents the chat token minted at creation. Fetching
//! a thread marks the other party's messages as read.

use super::bookings::ChatTokenQuery;
use crate::auth::middleware::SessionUser;
use crate::server::state::AppState;
use artisthub_auth::OAuth2Provider;
use artisthub_booking::{ChatThread, DisplayMessage};
use artisthub_core::{BookingId, MessageId, SenderType, UserId};
use artisthub_notify::BookingNotifier;
use artisthub_web::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// A message to append to the chat.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message text.
    pub message: String,
}

/// One chat message, as exposed on the wire.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message id.
    pub id: MessageId,
    /// Owning booking.
    pub booking_request_id: BookingId,
    /// Authoring user; `null` for booker messages.
    pub sender_user_id: Option<UserId>,
    /// Authoring party (`artist` or `booker`).
    pub sender_type: SenderType,
    /// Message text.
    pub message: String,
    /// Creation time; threads order ascending by this.
    pub timestamp: DateTime<Utc>,
    /// Whether the other party had fetched the thread before this
    /// response was built.
    pub is_read: bool,
    /// Resolved sender display name.
    pub sender_name: String,
}

impl From<DisplayMessage> for MessageResponse {
    fn from(display: DisplayMessage) -> Self {
        let DisplayMessage {
            message,
            sender_name,
        } = display;
        Self {
            id: message.id,
            booking_request_id: message.booking_id,
            sender_user_id: message.sender_user_id,
            sender_type: message.sender_type,
            message: message.body,
            timestamp: message.created_at,
            is_read: message.is_read,
            sender_name,
        }
    }
}

/// A full chat thread, oldest message first.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Messages with resolved sender names.
    pub messages: Vec<MessageResponse>,
    /// Number of messages in the thread.
    pub total_count: usize,
}

impl From<ChatThread> for ChatResponse {
    fn from(thread: ChatThread) -> Self {
        Self {
            total_count: thread.total_count,
            messages: thread.messages.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Append an artist message to a booking's chat.
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown booking, 403 when
/// the caller does not own it.
pub async fn send_artist_message<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let sent = state
        .chat
        .send_as_artist(BookingId(booking_id), &user, &request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(sent.into())))
}

/// Append a booker message to a booking's chat.
///
/// # Example
///
/// ```bash
/// curl -X POST "http://localhost:8000/chat/1/messages/booker?chat_token=<token>" \
///   -H "Content-Type: application/json" \
///   -d '{"message": "Can you start at 20:00 instead?"}'
/// ```
///
/// # Errors
///
/// Returns 404 when the booking does not exist or the token does not
/// match it.
pub async fn send_booker_message<P, N>(
    State(state): State<AppState<P, N>>,
    Path(booking_id): Path<i64>,
    Query(query): Query<ChatTokenQuery>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let sent = state
        .chat
        .send_as_booker(BookingId(booking_id), &query.chat_token, &request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(sent.into())))
}

/// The thread as the owning artist sees it.
///
/// Marks the booker's unread messages as read; the returned flags show
/// the thread as the artist found it.
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown booking, 403 when
/// the caller does not own it.
pub async fn artist_messages<P, N>(
    State(state): State<AppState<P, N>>,
    SessionUser(user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<ChatResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let thread = state
        .chat
        .read_as_artist(BookingId(booking_id), &user)
        .await?;
    Ok(Json(thread.into()))
}

/// The thread as the anonymous booker sees it.
///
/// Marks the artist's unread messages as read, mirroring the artist
/// read.
///
/// # Errors
///
/// Returns 404 when the booking does not exist or the token does not
/// match it.
pub async fn booker_messages<P, N>(
    State(state): State<AppState<P, N>>,
    Path(booking_id): Path<i64>,
    Query(query): Query<ChatTokenQuery>,
) -> Result<Json<ChatResponse>, AppError>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    let thread = state
        .chat
        .read_as_booker(BookingId(booking_id), &query.chat_token)
        .await?;
    Ok(Json(thread.into()))
}
