//! Booking status state machine.
//!
//! ```text
//!              ┌──────────┐
//!     ┌───────▶│ accepted │────┐
//!     │        └──────────┘    │
//! ┌─────────┐                  ▼
//! │ pending │            ┌───────────┐
//! └─────────┘            │ cancelled │
//!     │   └─────────────▶└───────────┘
//!     ▼
//! ┌──────────┐
//! │ rejected │
//! └──────────┘
//! ```
//!
//! `rejected` and `cancelled` are terminal. Repeating the current status is
//! an allowed no-op so retried writes stay idempotent.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Initial state; awaiting the artist's decision.
    Pending,
    /// Confirmed by the artist.
    Accepted,
    /// Declined by the artist. Terminal.
    Rejected,
    /// Withdrawn after being pending or accepted. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Stable string form, as persisted and as accepted on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this status holds a slot: only `pending` and `accepted`
    /// bookings participate in duplicate-slot detection.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Whether a booking in this status may still be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Validate a transition from `self` to `to`.
    ///
    /// Writing the current status again is permitted as an idempotent
    /// no-op. `rejected` and `cancelled` admit nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] when the state machine
    /// forbids the move.
    pub const fn validate_transition(self, to: Self) -> Result<(), DomainError> {
        if matches!(
            (self, to),
            (Self::Pending, _)
                | (Self::Accepted, Self::Accepted | Self::Cancelled)
                | (Self::Rejected, Self::Rejected)
                | (Self::Cancelled, Self::Cancelled)
        ) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn pending_reaches_every_state() {
        for to in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert!(BookingStatus::Pending.validate_transition(to).is_ok());
        }
    }

    #[test]
    fn accepted_can_cancel_but_not_reject() {
        assert!(BookingStatus::Accepted
            .validate_transition(BookingStatus::Cancelled)
            .is_ok());
        assert!(BookingStatus::Accepted
            .validate_transition(BookingStatus::Rejected)
            .is_err());
        assert!(BookingStatus::Accepted
            .validate_transition(BookingStatus::Pending)
            .is_err());
    }

    #[test]
    fn terminal_states_admit_only_themselves() {
        for terminal in [BookingStatus::Rejected, BookingStatus::Cancelled] {
            for to in [
                BookingStatus::Pending,
                BookingStatus::Accepted,
                BookingStatus::Rejected,
                BookingStatus::Cancelled,
            ] {
                let result = terminal.validate_transition(to);
                if to == terminal {
                    assert!(result.is_ok(), "{terminal} -> {to} should be a no-op");
                } else {
                    assert!(result.is_err(), "{terminal} -> {to} should be rejected");
                }
            }
        }
    }

    #[test]
    fn repeated_status_is_idempotent() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert!(status.validate_transition(status).is_ok());
        }
    }

    #[test]
    fn active_set_matches_duplicate_policy() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Accepted.is_active());
        assert!(!BookingStatus::Rejected.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn parse_round_trips_known_values() {
        for s in ["pending", "accepted", "rejected", "cancelled"] {
            assert_eq!(BookingStatus::from_str(s).unwrap().as_str(), s);
        }
        assert!(matches!(
            BookingStatus::from_str("archived"),
            Err(DomainError::InvalidStatus(v)) if v == "archived"
        ));
    }
}
