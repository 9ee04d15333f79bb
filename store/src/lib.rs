//! # ArtistHub Store
//!
//! SQLite persistence for the ArtistHub booking platform, built on the
//! `sqlx` runtime query API with embedded migrations.
//!
//! One [`Database`] handle wraps the connection pool; query methods are
//! grouped by entity in the `queries_*` modules as `impl Database` blocks.
//! Row structs in [`models`] map columns to the domain types in
//! `artisthub-core`.
//!
//! Every write here is a single SQL statement and therefore atomic; the
//! schema carries the constraints the services rely on under concurrency,
//! most importantly the partial unique index that admits at most one
//! `pending`/`accepted` booking per artist slot.

pub mod db;
pub mod error;
pub mod models;

mod queries_bookings;
mod queries_calendar;
mod queries_chat;
mod queries_profiles;
mod queries_sessions;
mod queries_users;

pub use db::Database;
pub use error::StoreError;
pub use models::BookingDraft;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
