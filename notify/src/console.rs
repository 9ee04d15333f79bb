//! Console notifier for development and testing.

use crate::error::Result;
use crate::notifier::{BookingConfirmation, BookingNotifier};
use tracing::info;

/// Console notifier.
///
/// Logs booking confirmations to the console instead of sending them.
/// Useful for development where you don't want to send real emails.
#[derive(Clone, Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Create a new console notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BookingNotifier for ConsoleNotifier {
    async fn send_booking_confirmation(&self, confirmation: &BookingConfirmation) -> Result<()> {
        info!(
            to = %confirmation.client_email,
            artist = %confirmation.artist_name,
            "📧 Booking Confirmation Email (Development Mode)"
        );
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                BOOKING CONFIRMATION EMAIL                    ║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║ To: {:<57}║", confirmation.client_email);
        println!("║ Subject: {:<52}║", confirmation.subject());
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║                                                              ║");
        println!(
            "║ {:<61}║",
            format!("Artist:   {}", confirmation.artist_name)
        );
        println!(
            "║ {:<61}║",
            format!(
                "Event:    {} at {}",
                confirmation.event_date.format("%Y-%m-%d"),
                confirmation.event_time.format("%H:%M")
            )
        );
        println!(
            "║ {:<61}║",
            format!(
                "Venue:    {} ({}, {})",
                confirmation.venue_name, confirmation.city, confirmation.country
            )
        );
        println!(
            "║ {:<61}║",
            format!("Budget:   {} {}", confirmation.budget, confirmation.currency)
        );
        println!("║                                                              ║");
        println!("║ Chat Link:                                                   ║");
        println!("║ {:<61}║", confirmation.chat_url);
        println!("║                                                              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        Ok(())
    }
}
