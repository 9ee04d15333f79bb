//! Domain entity types.
//!
//! All identifiers are newtypes over the store's integer keys. Entities are
//! plain data: ownership and access rules are enforced by the services in
//! `artisthub-booking`, not here.

use crate::error::DomainError;
use crate::status::BookingStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
///
/// Artist identity throughout the system is the artist's `UserId`; bookings
/// and calendar blocks reference artists by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub i64);

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

/// Unique identifier for a server-side session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub i64);

// ═══════════════════════════════════════════════════════════════════════
// Users and Sessions
// ═══════════════════════════════════════════════════════════════════════

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An artist who receives and manages booking requests.
    Artist,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Stable string form, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role string. Unknown values fold to `Artist`,
    /// matching the store's column default.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::Artist,
        }
    }
}

/// An authenticated party, created on first OAuth login (upsert by email).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable identity.
    pub id: UserId,

    /// Unique email address, the upsert key at login.
    pub email: String,

    /// Display name as reported by the identity provider.
    pub name: String,

    /// Role, `artist` by default.
    pub role: Role,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A server-side session record backing a session token.
///
/// The token value itself is opaque to this crate; expiry checks
/// compare `expires_at` against the current time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Row identity.
    pub id: SessionId,

    /// Owning user.
    pub user_id: UserId,

    /// The token value presented back by the client.
    pub token: String,

    /// Hard expiry; lookups ignore rows past this instant.
    pub expires_at: DateTime<Utc>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Artist Profiles
// ═══════════════════════════════════════════════════════════════════════

/// Social media links for an artist profile.
///
/// A closed key set validated at the boundary; persisted as JSON text.
/// Absent platforms serialize away entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinks {
    /// Instagram profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,

    /// Twitter/X profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    /// Facebook page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    /// YouTube channel URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,

    /// SoundCloud profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundcloud: Option<String>,

    /// Spotify artist URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
}

impl SocialLinks {
    /// Parse the stored JSON form.
    ///
    /// Empty or missing text maps to the empty link set. Unknown keys are
    /// rejected so malformed writes surface at the boundary instead of
    /// round-tripping silently.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSocialLinks`] when the text is not a
    /// JSON object over the known platform keys.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).map_err(|e| DomainError::InvalidSocialLinks(e.to_string()))
    }

    /// Stored JSON form.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// True when no platform link is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instagram.is_none()
            && self.twitter.is_none()
            && self.facebook.is_none()
            && self.youtube.is_none()
            && self.soundcloud.is_none()
            && self.spotify.is_none()
    }
}

/// One-to-one artist extension of a [`User`].
///
/// Created lazily on first profile write; every field except the owner
/// reference is optional until the artist fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistProfile {
    /// Owning user; also the artist identity bookings reference.
    pub user_id: UserId,

    /// Public stage name, preferred over the user name when present.
    pub stage_name: Option<String>,

    /// Free-text biography.
    pub bio: Option<String>,

    /// Genre tags.
    pub genres: Vec<String>,

    /// Social media links.
    pub social_links: SocialLinks,

    /// Minimum acceptable booking budget, in `currency`.
    pub min_price: Option<f64>,

    /// Currency code for `min_price` (for example "USD").
    pub currency: Option<String>,

    /// Photo reference (URL or object key).
    pub photo: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ArtistProfile {
    /// Display name for public and chat contexts: stage name when set and
    /// non-blank, otherwise `user_name`.
    #[must_use]
    pub fn display_name<'a>(&'a self, user_name: &'a str) -> &'a str {
        match self.stage_name.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => user_name,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bookings
// ═══════════════════════════════════════════════════════════════════════

/// Client contact block submitted with a booking request.
///
/// Serializes with `client_`-prefixed keys and is flattened into booking
/// payloads, so the wire format stays flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    /// Client first name.
    #[serde(rename = "client_first_name")]
    pub first_name: String,

    /// Client last name.
    #[serde(rename = "client_last_name")]
    pub last_name: String,

    /// Client email; receives the confirmation notification and doubles
    /// as the weak read ACL on the booking.
    #[serde(rename = "client_email")]
    pub email: String,

    /// Phone number.
    #[serde(default, rename = "client_phone")]
    pub phone: Option<String>,

    /// Company, for corporate events.
    #[serde(default, rename = "client_company")]
    pub company: Option<String>,
}

/// Input to the booking create operation, exactly as submitted by the
/// anonymous client. Date and time arrive as strings and are validated by
/// [`crate::validate`] before anything persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBookingRequest {
    /// Event date, `YYYY-MM-DD`.
    pub event_date: String,

    /// Event time of day, `HH:MM`.
    pub event_time: String,

    /// Timezone label for the event (informational).
    pub time_zone: String,

    /// Offered budget, in `currency`.
    pub budget: f64,

    /// Currency code for the budget.
    pub currency: String,

    /// Venue name.
    pub venue_name: String,

    /// Venue street address.
    #[serde(default)]
    pub venue_address: Option<String>,

    /// Event city.
    pub city: String,

    /// Event country.
    pub country: String,

    /// Performance duration in minutes.
    pub performance_duration: i64,

    /// Expected number of participants.
    pub participant_count: i64,

    /// Travel costs covered by the client.
    #[serde(default)]
    pub includes_travel: bool,

    /// Accommodation covered by the client.
    #[serde(default)]
    pub includes_accommodation: bool,

    /// Ground transportation covered by the client.
    #[serde(default)]
    pub includes_ground_transportation: bool,

    /// Client contact block.
    #[serde(flatten)]
    pub client: ClientContact,

    /// Optional free-text message, seeded into the chat on success.
    #[serde(default)]
    pub client_message: Option<String>,
}

/// Artist-editable booking fields; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingUpdate {
    /// New event date, `YYYY-MM-DD`.
    #[serde(default)]
    pub event_date: Option<String>,

    /// New event time, `HH:MM`.
    #[serde(default)]
    pub event_time: Option<String>,

    /// New performance duration in minutes.
    #[serde(default)]
    pub performance_duration: Option<i64>,

    /// New budget.
    #[serde(default)]
    pub budget: Option<f64>,
}

impl BookingUpdate {
    /// True when no field is set; such an update is a no-op.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.event_date.is_none()
            && self.event_time.is_none()
            && self.performance_duration.is_none()
            && self.budget.is_none()
    }
}

/// The central entity: a client's request to book an artist.
///
/// Never hard-deleted; cancellation is a status. The `chat_token` is minted
/// once at creation and maps to exactly this booking for the lifetime of
/// the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Stable identity.
    pub id: BookingId,

    /// The artist being booked, by user id.
    pub artist_id: UserId,

    /// Event date.
    pub event_date: NaiveDate,

    /// Event time of day.
    pub event_time: NaiveTime,

    /// Timezone label.
    pub time_zone: String,

    /// Offered budget.
    pub budget: f64,

    /// Currency code for the budget.
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

    /// Expected number of participants.
    pub participant_count: i64,

    /// Travel covered.
    pub includes_travel: bool,

    /// Accommodation covered.
    pub includes_accommodation: bool,

    /// Ground transportation covered.
    pub includes_ground_transportation: bool,

    /// Client contact block.
    #[serde(flatten)]
    pub client: ClientContact,

    /// Free-text message submitted with the request.
    pub client_message: Option<String>,

    /// Lifecycle status.
    pub status: BookingStatus,

    /// Per-booking bearer credential for the anonymous client.
    pub chat_token: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BookingRequest {
    /// Whether `user_id` is the owning artist.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.artist_id == user_id
    }
}

/// Mint a fresh chat token for a new booking.
///
/// UUID v4: unguessable, unique, and equality-checked server side. Tokens
/// never rotate and never expire while the booking exists.
#[must_use]
pub fn new_chat_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ═══════════════════════════════════════════════════════════════════════
// Calendar Blocks
// ═══════════════════════════════════════════════════════════════════════

/// An artist-declared unavailable interval, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarBlock {
    /// Row identity.
    pub id: i64,

    /// Owning artist, by user id.
    pub artist_id: UserId,

    /// Blocked date.
    pub block_date: NaiveDate,

    /// Interval start, inclusive.
    pub start_time: NaiveTime,

    /// Interval end, inclusive.
    pub end_time: NaiveTime,

    /// Free-text reason.
    pub reason: Option<String>,
}

impl CalendarBlock {
    /// Whether `time` falls inside this block.
    ///
    /// Both endpoints count: a booking at exactly `start_time` or exactly
    /// `end_time` is blocked.
    #[must_use]
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Chat Messages
// ═══════════════════════════════════════════════════════════════════════

/// Which party authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    /// The owning artist, authenticated via session.
    Artist,
    /// The anonymous client, authorized via chat token.
    Booker,
}

impl SenderType {
    /// Stable string form, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Booker => "booker",
        }
    }

    /// The opposite party, whose unread messages a read marks as read.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Artist => Self::Booker,
            Self::Booker => Self::Artist,
        }
    }
}

impl std::str::FromStr for SenderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(Self::Artist),
            "booker" => Ok(Self::Booker),
            other => Err(DomainError::InvalidSenderType(other.to_string())),
        }
    }
}

/// One message in a booking's chat. Immutable once created, except for the
/// read flag which is flipped in bulk when the other party fetches the
/// thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable identity.
    pub id: MessageId,

    /// Owning booking.
    pub booking_id: BookingId,

    /// Authoring party.
    pub sender_type: SenderType,

    /// Authoring user, `None` for booker messages.
    pub sender_user_id: Option<UserId>,

    /// Message body.
    pub body: String,

    /// Creation timestamp; threads order ascending by this.
    pub created_at: DateTime<Utc>,

    /// Whether the other party has fetched the thread since this message.
    pub is_read: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn social_links_roundtrip() {
        let links = SocialLinks {
            instagram: Some("https://instagram.com/a".to_string()),
            spotify: Some("https://open.spotify.com/artist/x".to_string()),
            ..SocialLinks::default()
        };
        let json = links.to_json();
        let parsed = SocialLinks::from_json(&json).unwrap();
        assert_eq!(parsed, links);
    }

    #[test]
    fn social_links_empty_text_is_default() {
        assert_eq!(SocialLinks::from_json("").unwrap(), SocialLinks::default());
        assert_eq!(
            SocialLinks::from_json("  ").unwrap(),
            SocialLinks::default()
        );
        assert!(SocialLinks::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn social_links_rejects_unknown_platforms() {
        let result = SocialLinks::from_json(r#"{"myspace": "https://myspace.com/a"}"#);
        assert!(matches!(result, Err(DomainError::InvalidSocialLinks(_))));
    }

    #[test]
    fn block_covers_is_inclusive_on_both_ends() {
        let block = CalendarBlock {
            id: 1,
            artist_id: UserId(1),
            block_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            reason: None,
        };
        assert!(block.covers(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
        assert!(block.covers(NaiveTime::from_hms_opt(20, 0, 0).unwrap()));
        assert!(block.covers(NaiveTime::from_hms_opt(19, 30, 0).unwrap()));
        assert!(!block.covers(NaiveTime::from_hms_opt(17, 59, 0).unwrap()));
        assert!(!block.covers(NaiveTime::from_hms_opt(20, 1, 0).unwrap()));
    }

    #[test]
    fn display_name_prefers_nonblank_stage_name() {
        let mut profile = ArtistProfile {
            user_id: UserId(1),
            stage_name: Some("DJ Nova".to_string()),
            bio: None,
            genres: vec![],
            social_links: SocialLinks::default(),
            min_price: None,
            currency: None,
            photo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(profile.display_name("Dana Levi"), "DJ Nova");

        profile.stage_name = Some("   ".to_string());
        assert_eq!(profile.display_name("Dana Levi"), "Dana Levi");

        profile.stage_name = None;
        assert_eq!(profile.display_name("Dana Levi"), "Dana Levi");
    }

    #[test]
    fn chat_tokens_are_unique() {
        let a = new_chat_token();
        let b = new_chat_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn sender_type_other_flips_party() {
        assert_eq!(SenderType::Artist.other(), SenderType::Booker);
        assert_eq!(SenderType::Booker.other(), SenderType::Artist);
    }
}
