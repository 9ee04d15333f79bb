//! Recording notifier for testing.

use crate::error::{NotifyError, Result};
use crate::notifier::{BookingConfirmation, BookingNotifier};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// Recording notifier.
///
/// Captures every confirmation it is asked to send so tests can assert
/// on notification side effects without a mail server.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    /// Whether to simulate success or failure.
    should_succeed: bool,

    /// Confirmations received so far, including failed ones.
    sent: Arc<Mutex<Vec<BookingConfirmation>>>,
}

impl RecordingNotifier {
    /// Create a recording notifier that accepts every send.
    #[must_use]
    pub fn new() -> Self {
        Self {
            should_succeed: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a recording notifier that fails every send.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            ..Self::new()
        }
    }

    /// Confirmations recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<BookingConfirmation> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingNotifier for RecordingNotifier {
    fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> impl Future<Output = Result<()>> + Send {
        let should_succeed = self.should_succeed;
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(confirmation.clone());

        async move {
            if !should_succeed {
                return Err(NotifyError::Send("recording notifier failure".to_string()));
            }
            Ok(())
        }
    }
}
