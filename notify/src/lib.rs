//! # ArtistHub Notify
//!
//! Booking confirmation notifications.
//!
//! When a booking request lands, the client gets a confirmation email
//! with the event summary and their anonymous chat link. Delivery is
//! best-effort by contract: the booking service logs failures and moves
//! on, so this crate never sits on the critical path of a create.
//!
//! [`BookingNotifier`] is the seam. [`SmtpNotifier`] delivers over SMTP
//! in production, [`ConsoleNotifier`] prints during development, and
//! [`mocks::RecordingNotifier`] captures sends for tests.

pub mod console;
pub mod error;
pub mod mocks;
pub mod notifier;
pub mod smtp;

pub use console::ConsoleNotifier;
pub use error::{NotifyError, Result};
pub use mocks::RecordingNotifier;
pub use notifier::{BookingConfirmation, BookingNotifier};
pub use smtp::SmtpNotifier;
