//! # ArtistHub Server
//!
//! HTTP surface for the ArtistHub booking platform.
//!
//! Wires the service crates behind an Axum router:
//!
//! ```text
//! /auth/*              Google OAuth login, session cookie, logout
//! /profile/me          the authenticated artist's own profile
//! /public/artist/:id   unauthenticated public profile view
//! /bookings/*          booking lifecycle (create is anonymous, the
//!                      rest is owner-scoped)
//! /chat/*              per-booking chat, artist by session and booker
//!                      by chat token
//! /health, /health/ready
//! ```
//!
//! [`AppState`] is generic over the OAuth provider and the notifier so the
//! whole router can be exercised in tests with
//! `artisthub_auth::mocks::MockOAuth2Provider` and
//! `artisthub_notify::RecordingNotifier` against an in-memory database.

pub mod api;
pub mod auth;
pub mod config;
pub mod notifier;
pub mod server;

pub use config::Config;
pub use notifier::AppNotifier;
pub use server::{build_router, AppState};
