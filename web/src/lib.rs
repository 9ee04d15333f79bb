//! # ArtistHub Web
//!
//! Shared Axum plumbing for the ArtistHub API: error rendering, request
//! extractors and the correlation-id middleware. The HTTP handlers live
//! in the server binary; this crate decides how requests are tracked and
//! how failures turn into JSON.
//!
//! ## Request Flow
//!
//! ```text
//! request  → correlation id extracted or minted, span opened
//! handler  → calls the auth/booking services, `?` on their errors
//! failure  → From<AuthError> / From<BookingError> pick a status code
//! response → {"error": {"code": "...", "message": "..."}}
//! ```
//!
//! Service error messages pass through to the body verbatim; the web
//! layer only chooses status codes and logs 5xx causes.

pub mod error;
pub mod extractors;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
