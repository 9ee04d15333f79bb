//! Booking service error types.

use artisthub_core::DomainError;
use artisthub_store::StoreError;
use thiserror::Error;

/// Result type for booking and chat operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Booking and chat errors.
///
/// Message texts are part of the API: the web layer surfaces them verbatim,
/// so clients match on them.
#[derive(Debug, Error)]
pub enum BookingError {
    // ═══════════════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════════════
    /// Malformed input or a forbidden state-machine move.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The offered budget is below the artist's minimum price.
    #[error("Budget must be at least {min_price} {currency}")]
    BudgetTooLow {
        /// The artist's configured minimum.
        min_price: f64,
        /// Currency the minimum is quoted in.
        currency: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Scheduling Conflicts
    // ═══════════════════════════════════════════════════════════════════
    /// The requested time falls inside a calendar block.
    #[error("Artist is not available at the requested time")]
    ArtistUnavailable,

    /// A pending or accepted booking already holds this slot.
    #[error("A booking already exists for this artist at the requested time")]
    DuplicateBooking,

    // ═══════════════════════════════════════════════════════════════════
    // Lookup and Access Errors
    // ═══════════════════════════════════════════════════════════════════
    /// No artist profile exists for the requested user id.
    #[error("Artist not found")]
    ArtistNotFound,

    /// The booking does not exist.
    #[error("Booking not found")]
    BookingNotFound,

    /// The booking does not exist or the presented chat token does not
    /// match it. Deliberately indistinguishable, so token probing reveals
    /// nothing about which booking ids exist.
    #[error("Booking not found or invalid chat token")]
    InvalidChatToken,

    /// The caller is authenticated but not the owning artist.
    #[error("Access denied")]
    Forbidden,

    /// The caller asked for another artist's booking list.
    #[error("You can only view your own bookings")]
    OwnBookingsOnly,

    // ═══════════════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════════════
    /// Database failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl BookingError {
    /// Check if this error was caused by the caller rather than the system.
    ///
    /// # Example
    ///
    /// ```
    /// use artisthub_booking::BookingError;
    ///
    /// assert!(BookingError::ArtistUnavailable.is_user_error());
    /// assert!(!BookingError::Store(
    ///     artisthub_store::StoreError::Query("locked".to_string())
    /// ).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Check if this error reports a scheduling conflict on the slot.
    ///
    /// # Example
    ///
    /// ```
    /// use artisthub_booking::BookingError;
    ///
    /// assert!(BookingError::DuplicateBooking.is_conflict());
    /// assert!(!BookingError::Forbidden.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ArtistUnavailable | Self::DuplicateBooking)
    }
}
