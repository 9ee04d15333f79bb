//! Notification error types.

use thiserror::Error;

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Notification delivery errors.
///
/// Callers treat delivery as best-effort: a failed confirmation email
/// never fails the booking that triggered it.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// An email address failed to parse.
    #[error("Invalid email address: {0}")]
    Address(String),

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Build(String),

    /// The transport refused or failed to deliver.
    #[error("Failed to send email: {0}")]
    Send(String),
}
