//! # ArtistHub Core
//!
//! Domain model for the ArtistHub booking platform.
//!
//! This crate holds the pure domain layer: entity types, the booking status
//! state machine, the creation-time validation rules, and sender display-name
//! resolution for the chat channel. It performs no I/O and has no async
//! surface; persistence and transport live in the `artisthub-store` and
//! `artisthub-web` crates.
//!
//! ## Core Concepts
//!
//! - **User / ArtistProfile**: an authenticated party and its one-to-one
//!   artist extension (stage name, pricing, social links).
//! - **BookingRequest**: the central entity, created by an anonymous client
//!   against an artist and carrying a per-booking chat token.
//! - **BookingStatus**: `pending → accepted | rejected | cancelled`, with
//!   `cancelled` reachable only from `pending` or `accepted`.
//! - **ChatMessage**: append-only two-party message log per booking.
//! - **CalendarBlock**: artist-declared unavailability, inclusive bounds.

pub mod chat;
pub mod error;
pub mod status;
pub mod types;
pub mod validate;

pub use chat::{artist_display_name, booker_display_name};
pub use error::DomainError;
pub use status::BookingStatus;
pub use types::{
    new_chat_token, ArtistProfile, BookingId, BookingRequest, BookingUpdate, CalendarBlock,
    ChatMessage, ClientContact, MessageId, NewBookingRequest, Role, SenderType, Session,
    SessionId, SocialLinks, User, UserId,
};

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
