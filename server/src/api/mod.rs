//! API endpoints for the ArtistHub server.
//!
//! This module contains all HTTP API handlers organized by domain:
//! - Profile: the authenticated artist's own profile
//! - Public: unauthenticated artist profile views
//! - Bookings: booking lifecycle operations
//! - Chat: per-booking messages for both parties

pub mod bookings;
pub mod chat;
pub mod profile;
pub mod public;

pub use bookings::{
    artist_bookings, booking_for_booker, cancel_booking, create_booking, get_booking,
    update_booking, update_booking_status,
};
pub use chat::{artist_messages, booker_messages, send_artist_message, send_booker_message};
pub use profile::{my_profile, update_my_profile};
pub use public::artist_profile;
