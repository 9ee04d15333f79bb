//! Router configuration for the ArtistHub server.
//!
//! Builds the complete Axum router with all endpoints.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{bookings, chat, profile, public};
use crate::auth::handlers as auth_handlers;
use artisthub_auth::OAuth2Provider;
use artisthub_notify::BookingNotifier;
use artisthub_web::correlation_id_layer;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures all routes:
/// - Health checks
/// - Authentication (Google OAuth + session cookie)
/// - Artist profile management and the public profile view
/// - Booking lifecycle
/// - Per-booking chat
///
/// Every response carries an `X-Correlation-ID` header, and all requests
/// are traced under a correlation span.
///
/// # Arguments
///
/// - `state`: Application state to share with handlers
///
/// # Returns
///
/// Configured Axum router ready to serve requests.
pub fn build_router<P, N>(state: AppState<P, N>) -> Router
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        // Authentication
        .route("/auth/login", get(auth_handlers::login))
        .route("/auth/callback", get(auth_handlers::callback))
        .route("/auth/me", get(auth_handlers::me))
        .route("/auth/logout", post(auth_handlers::logout))
        // Artist profile (session-scoped) and public view
        .route("/profile/me", get(profile::my_profile))
        .route("/profile/me", put(profile::update_my_profile))
        .route("/public/artist/:user_id", get(public::artist_profile))
        // Booking lifecycle
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id", put(bookings::update_booking))
        .route("/bookings/:id", delete(bookings::cancel_booking))
        .route("/bookings/:id/status", put(bookings::update_booking_status))
        .route("/bookings/artist/:artist_id", get(bookings::artist_bookings))
        .route(
            "/bookings/chat/:id/getbookingchat/booker",
            get(bookings::booking_for_booker),
        )
        // Chat
        .route(
            "/chat/:booking_id/messages/artist",
            post(chat::send_artist_message),
        )
        .route(
            "/chat/:booking_id/messages/artist",
            get(chat::artist_messages),
        )
        .route(
            "/chat/:booking_id/messages/booker",
            post(chat::send_booker_message),
        )
        .route(
            "/chat/:booking_id/getmessages/booker",
            get(chat::booker_messages),
        )
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
