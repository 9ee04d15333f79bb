//! Notifier trait and confirmation payload.

use crate::error::Result;
use chrono::{NaiveDate, NaiveTime};

/// Everything the confirmation email needs, already resolved.
///
/// The booking service assembles this from the booking row and the
/// artist's display name so notifiers never touch the database.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// Artist display name, as shown to the client.
    pub artist_name: String,

    /// Client full name.
    pub client_name: String,

    /// Client email address (the recipient).
    pub client_email: String,

    /// Event date.
    pub event_date: NaiveDate,

    /// Event start time.
    pub event_time: NaiveTime,

    /// Venue name.
    pub venue_name: String,

    /// Event city.
    pub city: String,

    /// Event country.
    pub country: String,

    /// Offered budget.
    pub budget: f64,

    /// Budget currency code.
    pub currency: String,

    /// Anonymous chat link for the client.
    pub chat_url: String,
}

impl BookingConfirmation {
    /// Email subject line for this confirmation.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Booking Confirmation - {}", self.artist_name)
    }
}

/// Booking notification sink.
///
/// This trait abstracts over delivery channels (SMTP, console) so the
/// booking service can be tested without a mail server.
pub trait BookingNotifier: Send + Sync {
    /// Send a booking confirmation to the client.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or delivered.
    fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_names_the_artist() {
        let confirmation = BookingConfirmation {
            artist_name: "DJ Nova".to_string(),
            client_name: "Dana Levi".to_string(),
            client_email: "dana@example.com".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            event_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            venue_name: "City Hall".to_string(),
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            budget: 800.0,
            currency: "USD".to_string(),
            chat_url: "http://localhost:3000/chat/1/tok".to_string(),
        };

        assert_eq!(confirmation.subject(), "Booking Confirmation - DJ Nova");
    }
}
