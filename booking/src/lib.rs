//! # ArtistHub Booking
//!
//! Booking lifecycle and per-booking chat for the ArtistHub API.
//!
//! ## Creation Pipeline
//!
//! ```text
//! artist exists → date → time → availability → budget → slot free → INSERT
//!                                                                     │
//!                                         seed chat with message  ◀───┤
//!                                         email confirmation      ◀───┘
//! ```
//!
//! The checks run in a fixed order so every failing request reports one
//! well-defined error; the two post-insert steps are best effort and never
//! fail the create.
//!
//! [`BookingService`] owns the lifecycle (create, read, list, edit, status,
//! cancel); [`ChatService`] owns the message log, where the artist
//! authenticates by session and the anonymous booker by the chat token
//! minted at creation.

pub mod chat;
pub mod error;
pub mod service;

pub use chat::{ChatService, ChatThread, DisplayMessage};
pub use error::{BookingError, Result};
pub use service::{BookingChatView, BookingService};
