//! Application state for the ArtistHub HTTP server.

use artisthub_auth::{AuthConfig, OAuth2Provider, SessionService};
use artisthub_booking::{BookingService, ChatService};
use artisthub_notify::BookingNotifier;
use artisthub_store::Database;
use axum::extract::FromRef;

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone; every field is a handle over the same connection pool.
/// Generic over the OAuth provider and the notifier so tests can swap in
/// mocks without touching the router.
#[derive(Clone)]
pub struct AppState<P, N> {
    /// Database handle, used directly by the profile handlers.
    pub db: Database,

    /// Session lifecycle: login, cookie resolution, logout.
    pub sessions: SessionService,

    /// Booking lifecycle service.
    pub bookings: BookingService<N>,

    /// Per-booking chat service.
    pub chat: ChatService,

    /// OAuth provider for the login round trips.
    pub oauth: P,

    /// Frontend base URL, without a trailing slash.
    pub frontend_url: String,
}

impl<P, N> AppState<P, N>
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    /// Create the application state over one database handle.
    #[must_use]
    pub fn new(
        db: Database,
        auth_config: AuthConfig,
        oauth: P,
        notifier: N,
        frontend_url: String,
    ) -> Self {
        Self {
            sessions: SessionService::new(db.clone(), auth_config),
            bookings: BookingService::new(db.clone(), notifier, frontend_url.clone()),
            chat: ChatService::new(db.clone()),
            db,
            oauth,
            frontend_url,
        }
    }
}

// Lets the session extractor work against any state that carries a
// SessionService, regardless of the provider/notifier parameters.
impl<P, N> FromRef<AppState<P, N>> for SessionService {
    fn from_ref(state: &AppState<P, N>) -> Self {
        state.sessions.clone()
    }
}
