//! # ArtistHub Auth
//!
//! Google OAuth login and cookie sessions for the ArtistHub API.
//!
//! ## Login Flow
//!
//! ```text
//! GET /auth/login     → state cookie + redirect to Google
//! GET /auth/callback  → verify state, exchange code, fetch user info,
//!                       upsert user, mint session token, set cookie
//! GET /auth/me        → resolve cookie to the logged-in user
//! POST /auth/logout   → delete the session row, clear the cookie
//! ```
//!
//! Session tokens are opaque 256-bit random values; the `user_sessions`
//! table decides what they mean. The [`OAuth2Provider`] trait keeps the
//! Google round trips swappable so the flow is testable offline via
//! [`mocks::MockOAuth2Provider`].

pub mod config;
pub mod error;
pub mod mocks;
pub mod oauth;
pub mod sessions;
pub mod tokens;

pub use config::{cookies, AuthConfig};
pub use error::{AuthError, Result};
pub use oauth::{verify_state, GoogleOAuthProvider, OAuth2Provider, OAuthUserInfo};
pub use sessions::SessionService;
pub use tokens::generate_token;
