//! Row structs mapping SQLite columns to the domain types.
//!
//! Rows decode with `sqlx::FromRow` and convert into `artisthub-core`
//! types; conversions are fallible wherever a stored string re-enters a
//! closed domain (status, sender type, social links).

use crate::error::StoreError;
use artisthub_core::{
    ArtistProfile, BookingId, BookingRequest, BookingStatus, CalendarBlock, ChatMessage,
    ClientContact, MessageId, Role, SenderType, Session, SessionId, SocialLinks, User, UserId,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// `users` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            name: row.name,
            role: Role::from_str_lossy(&row.role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `user_sessions` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SessionRow {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: SessionId(row.id),
            user_id: UserId(row.user_id),
            token: row.token,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

/// `artist_profiles` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ProfileRow {
    pub user_id: i64,
    pub stage_name: Option<String>,
    pub bio: Option<String>,
    pub genres: String,
    pub social_links: String,
    pub min_price: Option<f64>,
    pub currency: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for ArtistProfile {
    type Error = StoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId(row.user_id),
            stage_name: row.stage_name,
            bio: row.bio,
            genres: genres_from_text(&row.genres),
            social_links: SocialLinks::from_json(&row.social_links)?,
            min_price: row.min_price,
            currency: row.currency,
            photo: row.photo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `booking_requests` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i64,
    pub artist_id: i64,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub time_zone: String,
    pub budget: f64,
    pub currency: String,
    pub venue_name: String,
    pub venue_address: Option<String>,
    pub city: String,
    pub country: String,
    pub performance_duration: i64,
    pub participant_count: i64,
    pub includes_travel: bool,
    pub includes_accommodation: bool,
    pub includes_ground_transportation: bool,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_message: Option<String>,
    pub status: String,
    pub chat_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for BookingRequest {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookingId(row.id),
            artist_id: UserId(row.artist_id),
            event_date: row.event_date,
            event_time: row.event_time,
            time_zone: row.time_zone,
            budget: row.budget,
            currency: row.currency,
            venue_name: row.venue_name,
            venue_address: row.venue_address,
            city: row.city,
            country: row.country,
            performance_duration: row.performance_duration,
            participant_count: row.participant_count,
            includes_travel: row.includes_travel,
            includes_accommodation: row.includes_accommodation,
            includes_ground_transportation: row.includes_ground_transportation,
            client: ClientContact {
                first_name: row.client_first_name,
                last_name: row.client_last_name,
                email: row.client_email,
                phone: row.client_phone,
                company: row.client_company,
            },
            client_message: row.client_message,
            status: row.status.parse::<BookingStatus>()?,
            chat_token: row.chat_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `chat_messages` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct MessageRow {
    pub id: i64,
    pub booking_id: i64,
    pub sender_type: String,
    pub sender_user_id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = StoreError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MessageId(row.id),
            booking_id: BookingId(row.booking_id),
            sender_type: row.sender_type.parse::<SenderType>()?,
            sender_user_id: row.sender_user_id.map(UserId),
            body: row.body,
            created_at: row.created_at,
            is_read: row.is_read,
        })
    }
}

/// `calendar_blocks` table row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct BlockRow {
    pub id: i64,
    pub artist_id: i64,
    pub block_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: Option<String>,
}

impl From<BlockRow> for CalendarBlock {
    fn from(row: BlockRow) -> Self {
        Self {
            id: row.id,
            artist_id: UserId(row.artist_id),
            block_date: row.block_date,
            start_time: row.start_time,
            end_time: row.end_time,
            reason: row.reason,
        }
    }
}

/// Fully validated input to a booking insert.
///
/// Built by the booking service after the validation sequence passes;
/// dates and times arrive parsed and the chat token already minted.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    /// The artist being booked.
    pub artist_id: UserId,
    /// Validated event date.
    pub event_date: NaiveDate,
    /// Validated event time.
    pub event_time: NaiveTime,
    /// Timezone label.
    pub time_zone: String,
    /// Offered budget.
    pub budget: f64,
    /// Currency code.
    pub currency: String,
    /// Venue name.
    pub venue_name: String,
    /// Venue street address.
    pub venue_address: Option<String>,
    /// Event city.
    pub city: String,
    /// Event country.
    pub country: String,
    /// Performance duration in minutes.
    pub performance_duration: i64,
    /// Expected participant count.
    pub participant_count: i64,
    /// Travel covered.
    pub includes_travel: bool,
    /// Accommodation covered.
    pub includes_accommodation: bool,
    /// Ground transportation covered.
    pub includes_ground_transportation: bool,
    /// Client contact block.
    pub client: ClientContact,
    /// Free-text message submitted with the request.
    pub client_message: Option<String>,
    /// Freshly minted chat token.
    pub chat_token: String,
}

/// Genres persist as a comma-separated string, as the original data did.
pub(crate) fn genres_from_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn genres_to_text(genres: &[String]) -> String {
    genres
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn genres_roundtrip_through_comma_text() {
        let genres = vec!["jazz".to_string(), "electro swing".to_string()];
        let text = genres_to_text(&genres);
        assert_eq!(text, "jazz,electro swing");
        assert_eq!(genres_from_text(&text), genres);
    }

    #[test]
    fn genres_from_text_skips_blanks() {
        assert_eq!(
            genres_from_text(" jazz , , funk ,"),
            vec!["jazz".to_string(), "funk".to_string()]
        );
        assert!(genres_from_text("").is_empty());
    }

    #[test]
    fn booking_row_with_unknown_status_fails_decode() {
        let row = BookingRow {
            id: 1,
            artist_id: 2,
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            event_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            time_zone: "UTC".to_string(),
            budget: 100.0,
            currency: "USD".to_string(),
            venue_name: "Hall".to_string(),
            venue_address: None,
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            performance_duration: 60,
            participant_count: 10,
            includes_travel: false,
            includes_accommodation: false,
            includes_ground_transportation: false,
            client_first_name: "Dana".to_string(),
            client_last_name: "Levi".to_string(),
            client_email: "dana@example.com".to_string(),
            client_phone: None,
            client_company: None,
            client_message: None,
            status: "archived".to_string(),
            chat_token: "tok".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            BookingRequest::try_from(row),
            Err(StoreError::Decode(_))
        ));
    }
}
