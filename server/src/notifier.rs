//! Runtime notifier selection.
//!
//! The booking service is generic over [`BookingNotifier`]; this enum
//! closes that generic at startup so one binary can run with SMTP in
//! production and console output in development, chosen by configuration.

use crate::config::Config;
use artisthub_notify::{BookingConfirmation, BookingNotifier, ConsoleNotifier, SmtpNotifier};

/// Notifier implementation selected from configuration.
#[derive(Clone)]
pub enum AppNotifier {
    /// Real SMTP delivery via Lettre.
    Smtp(SmtpNotifier),
    /// Log-only delivery for development.
    Console(ConsoleNotifier),
}

impl AppNotifier {
    /// Pick the notifier the configuration asks for: SMTP when
    /// credentials are present, console otherwise.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        match &config.smtp {
            Some(smtp) => Self::Smtp(SmtpNotifier::new(
                smtp.server.clone(),
                smtp.port,
                smtp.username.clone(),
                smtp.password.clone(),
                smtp.from_email.clone(),
                smtp.from_name.clone(),
            )),
            None => Self::Console(ConsoleNotifier::new()),
        }
    }
}

impl BookingNotifier for AppNotifier {
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> artisthub_notify::Result<()> {
        match self {
            Self::Smtp(notifier) => notifier.send_booking_confirmation(confirmation).await,
            Self::Console(notifier) => notifier.send_booking_confirmation(confirmation).await,
        }
    }
}
