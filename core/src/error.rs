//! Domain error types.

use crate::status::BookingStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures produced by the pure domain layer.
///
/// These are client-fixable conditions; their messages surface verbatim to
/// callers. Infrastructure failures live in the store and service crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    // ═══════════════════════════════════════════════════════════════════
    // Input parsing
    // ═══════════════════════════════════════════════════════════════════
    /// Event date text did not parse as `YYYY-MM-DD`.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Event date is today or in the past.
    #[error("Event date {0} must be in the future")]
    PastDate(NaiveDate),

    /// Event time text did not parse as `HH:MM`.
    #[error("Invalid time format: '{0}'. Expected HH:MM")]
    InvalidTime(String),

    /// Status text is not a known booking status.
    #[error("Invalid status: '{0}'. Must be one of: accepted, rejected, cancelled")]
    InvalidStatus(String),

    /// Sender type text is not `artist` or `booker`.
    #[error("Invalid sender type: '{0}'")]
    InvalidSenderType(String),

    /// Social links text is not a JSON object over the known platforms.
    #[error("Invalid social links: {0}")]
    InvalidSocialLinks(String),

    // ═══════════════════════════════════════════════════════════════════
    // State machine
    // ═══════════════════════════════════════════════════════════════════
    /// The status state machine forbids this move.
    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: BookingStatus,
        /// Requested status.
        to: BookingStatus,
    },

    /// Cancellation requested from a non-cancellable status.
    #[error("Cannot cancel a booking with status {0}")]
    NotCancellable(BookingStatus),
}

impl DomainError {
    /// Whether this error reports a malformed or out-of-policy input, as
    /// opposed to a forbidden state-machine move.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_)
                | Self::PastDate(_)
                | Self::InvalidTime(_)
                | Self::InvalidStatus(_)
                | Self::InvalidSenderType(_)
                | Self::InvalidSocialLinks(_)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = DomainError::InvalidDate("06/02/2025".to_string());
        assert!(err.to_string().contains("06/02/2025"));

        let err = DomainError::InvalidTransition {
            from: BookingStatus::Rejected,
            to: BookingStatus::Accepted,
        };
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("accepted"));
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(DomainError::InvalidTime("x".to_string()).is_input_error());
        assert!(!DomainError::NotCancellable(BookingStatus::Rejected).is_input_error());
    }
}
