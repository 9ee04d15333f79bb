//! SMTP notifier implementation using Lettre.

use crate::error::{NotifyError, Result};
use crate::notifier::{BookingConfirmation, BookingNotifier};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP notifier using Lettre.
///
/// Sends real booking confirmation emails via SMTP, suitable for
/// production use.
///
/// # Configuration
///
/// - `smtp_server`: SMTP server address (e.g., "smtp.gmail.com")
/// - `smtp_port`: SMTP server port (usually 587 for TLS, 465 for SSL)
/// - `smtp_username`: SMTP authentication username
/// - `smtp_password`: SMTP authentication password
/// - `from_email`: Sender email address
/// - `from_name`: Sender display name
#[derive(Clone)]
pub struct SmtpNotifier {
    /// SMTP server address.
    smtp_server: String,

    /// SMTP server port.
    smtp_port: u16,

    /// SMTP credentials.
    credentials: Credentials,

    /// Sender email address.
    from_email: String,

    /// Sender display name.
    from_name: String,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier.
    ///
    /// # Arguments
    ///
    /// - `smtp_server`: SMTP server address
    /// - `smtp_port`: SMTP server port
    /// - `smtp_username`: SMTP authentication username
    /// - `smtp_password`: SMTP authentication password
    /// - `from_email`: Sender email address
    /// - `from_name`: Sender display name
    #[must_use]
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        let credentials = Credentials::new(smtp_username, smtp_password);

        Self {
            smtp_server,
            smtp_port,
            credentials,
            from_email,
            from_name,
        }
    }

    /// Build SMTP transport for sending emails.
    ///
    /// Creates a new transport for each email to avoid connection pooling
    /// issues.
    ///
    /// # Errors
    ///
    /// Returns error if SMTP connection fails.
    fn build_transport(&self) -> Result<SmtpTransport> {
        let transport = SmtpTransport::relay(&self.smtp_server)
            .map_err(|e| NotifyError::Send(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build();
        Ok(transport)
    }

    /// Build the "From" header.
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

impl BookingNotifier for SmtpNotifier {
    async fn send_booking_confirmation(&self, confirmation: &BookingConfirmation) -> Result<()> {
        let html_body = render_confirmation_html(confirmation);

        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| NotifyError::Address(format!("Invalid from address: {e}")))?,
            )
            .to(confirmation
                .client_email
                .parse()
                .map_err(|e| NotifyError::Address(format!("Invalid to address: {e}")))?)
            .subject(confirmation.subject())
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| NotifyError::Send(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::Send(format!("Email task failed: {e}")))?
        .map(|_| ())
    }
}

/// Render the confirmation email body.
fn render_confirmation_html(confirmation: &BookingConfirmation) -> String {
    let artist_name = &confirmation.artist_name;
    let event_date = confirmation.event_date.format("%Y-%m-%d");
    let event_time = confirmation.event_time.format("%H:%M");
    let venue_name = &confirmation.venue_name;
    let city = &confirmation.city;
    let country = &confirmation.country;
    let budget = confirmation.budget;
    let currency = &confirmation.currency;
    let chat_url = &confirmation.chat_url;

    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Booking Confirmation</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Booking Confirmation</h2>
        <p>Dear Client,</p>
        <p>Thank you for your booking request with {artist_name}.</p>
        <table style="border-collapse: collapse; width: 100%; margin: 20px 0;">
            <tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">Date</td>
                <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{event_date}</td></tr>
            <tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">Time</td>
                <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{event_time}</td></tr>
            <tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">Venue</td>
                <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{venue_name}</td></tr>
            <tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">Location</td>
                <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{city}, {country}</td></tr>
            <tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">Budget</td>
                <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{budget} {currency}</td></tr>
        </table>
        <p style="margin: 30px 0;">
            <a href="{chat_url}"
               style="display: inline-block; background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">
                Open Chat
            </a>
        </p>
        <p>If you have any questions, please feel free to contact us.</p>
        <p style="color: #666; font-size: 14px;">
            Best regards,<br>
            The ArtistHub Team
        </p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            Or copy and paste this link into your browser:<br>
            {chat_url}
        </p>
    </div>
</body>
</html>
            "#
    )
}
