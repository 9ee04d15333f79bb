//! Per-booking chat.
//!
//! Two parties, two credentials: the artist authenticates with a session
//! and must own the booking, the booker presents the chat token minted at
//! creation. Reading a thread marks the other party's unread messages as
//! read in one pass.

use crate::error::{BookingError, Result};
use artisthub_core::{
    artist_display_name, booker_display_name, BookingId, BookingRequest, ChatMessage, SenderType,
    User,
};
use artisthub_store::Database;
use chrono::Utc;
use constant_time_eq::constant_time_eq;

/// A chat message with its sender's display name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    /// The message as stored.
    pub message: ChatMessage,
    /// Resolved sender name: the client's full name for booker messages,
    /// the artist's user name (or `"Artist"`) for artist messages.
    pub sender_name: String,
}

/// A full chat thread, oldest message first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatThread {
    /// Messages with resolved sender names.
    pub messages: Vec<DisplayMessage>,
    /// Number of messages in the thread.
    pub total_count: usize,
}

/// Chat service over a booking's message log.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ChatService {
    db: Database,
}

impl ChatService {
    /// Create a chat service over a database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append an artist message to a booking's chat.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] for an unknown booking and
    /// [`BookingError::Forbidden`] when `caller` does not own it.
    pub async fn send_as_artist(
        &self,
        booking_id: BookingId,
        caller: &User,
        body: &str,
    ) -> Result<DisplayMessage> {
        self.booking_for_artist(booking_id, caller).await?;
        let message = self
            .db
            .insert_message(
                booking_id,
                SenderType::Artist,
                Some(caller.id),
                body,
                Utc::now(),
            )
            .await?;
        tracing::debug!(booking_id = %booking_id, message_id = message.id.0, "artist message sent");
        Ok(DisplayMessage {
            message,
            sender_name: artist_display_name(Some(&caller.name), None),
        })
    }

    /// Append a booker message to a booking's chat.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidChatToken`] when the booking does not
    /// exist or the token does not match it.
    pub async fn send_as_booker(
        &self,
        booking_id: BookingId,
        chat_token: &str,
        body: &str,
    ) -> Result<DisplayMessage> {
        let booking = self.booking_for_token(booking_id, chat_token).await?;
        let message = self
            .db
            .insert_message(booking_id, SenderType::Booker, None, body, Utc::now())
            .await?;
        tracing::debug!(booking_id = %booking_id, message_id = message.id.0, "booker message sent");
        Ok(DisplayMessage {
            message,
            sender_name: booker_display_name(
                &booking.client.first_name,
                &booking.client.last_name,
            ),
        })
    }

    /// Read the thread as the owning artist.
    ///
    /// Marks the booker's unread messages as read; the returned flags show
    /// the thread as the reader found it, before the mark.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] or
    /// [`BookingError::Forbidden`].
    pub async fn read_as_artist(&self, booking_id: BookingId, caller: &User) -> Result<ChatThread> {
        let booking = self.booking_for_artist(booking_id, caller).await?;
        let messages = self.db.list_messages(booking_id).await?;
        let thread = resolve_thread(&booking, messages, Some(&caller.name));

        let marked = self
            .db
            .mark_messages_read(booking_id, SenderType::Artist.other())
            .await?;
        if marked > 0 {
            tracing::debug!(booking_id = %booking_id, marked, "booker messages marked read");
        }
        Ok(thread)
    }

    /// Read the thread as the anonymous booker.
    ///
    /// Marks the artist's unread messages as read, mirroring
    /// [`Self::read_as_artist`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidChatToken`].
    pub async fn read_as_booker(
        &self,
        booking_id: BookingId,
        chat_token: &str,
    ) -> Result<ChatThread> {
        let booking = self.booking_for_token(booking_id, chat_token).await?;
        let artist_user = self.db.get_user(booking.artist_id).await?;
        let messages = self.db.list_messages(booking_id).await?;
        let thread = resolve_thread(
            &booking,
            messages,
            artist_user.as_ref().map(|u| u.name.as_str()),
        );

        let marked = self
            .db
            .mark_messages_read(booking_id, SenderType::Booker.other())
            .await?;
        if marked > 0 {
            tracing::debug!(booking_id = %booking_id, marked, "artist messages marked read");
        }
        Ok(thread)
    }

    async fn booking_for_artist(
        &self,
        booking_id: BookingId,
        caller: &User,
    ) -> Result<BookingRequest> {
        let Some(booking) = self.db.get_booking(booking_id).await? else {
            return Err(BookingError::BookingNotFound);
        };
        if !booking.is_owned_by(caller.id) {
            return Err(BookingError::Forbidden);
        }
        Ok(booking)
    }

    async fn booking_for_token(
        &self,
        booking_id: BookingId,
        chat_token: &str,
    ) -> Result<BookingRequest> {
        let Some(booking) = self.db.get_booking(booking_id).await? else {
            return Err(BookingError::InvalidChatToken);
        };
        if !constant_time_eq(booking.chat_token.as_bytes(), chat_token.as_bytes()) {
            return Err(BookingError::InvalidChatToken);
        }
        Ok(booking)
    }
}

/// Attach sender names to a fetched message list.
///
/// `artist_name` is the artist's user name as known to the calling path;
/// the only artist-side sender is the owner, so one name covers every
/// artist message.
fn resolve_thread(
    booking: &BookingRequest,
    messages: Vec<ChatMessage>,
    artist_name: Option<&str>,
) -> ChatThread {
    let booker_name = booker_display_name(&booking.client.first_name, &booking.client.last_name);
    let messages: Vec<DisplayMessage> = messages
        .into_iter()
        .map(|message| {
            let sender_name = match message.sender_type {
                SenderType::Booker => booker_name.clone(),
                SenderType::Artist => artist_display_name(artist_name, None),
            };
            DisplayMessage {
                message,
                sender_name,
            }
        })
        .collect();

    ChatThread {
        total_count: messages.len(),
        messages,
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::service::BookingService;
    use artisthub_core::{ArtistProfile, ClientContact, NewBookingRequest, SocialLinks};
    use artisthub_notify::RecordingNotifier;
    use chrono::Duration;

    async fn setup() -> (Database, User, BookingRequest, ChatService) {
        let db = Database::open_in_memory().await.expect("in-memory db");
        let now = Utc::now();
        let artist = db
            .upsert_user_by_email("artist@example.com", "Nova Jones", now)
            .await
            .unwrap();
        let profile = ArtistProfile {
            user_id: artist.id,
            stage_name: Some("DJ Nova".to_string()),
            bio: None,
            genres: vec![],
            social_links: SocialLinks::default(),
            min_price: None,
            currency: None,
            photo: None,
            created_at: now,
            updated_at: now,
        };
        db.save_profile(&profile, now).await.unwrap();

        let bookings = BookingService::new(
            db.clone(),
            RecordingNotifier::new(),
            "http://localhost:3000".to_string(),
        );
        let date = Utc::now().date_naive() + Duration::days(30);
        let booking = bookings
            .create(
                artist.id,
                NewBookingRequest {
                    event_date: date.format("%Y-%m-%d").to_string(),
                    event_time: "18:00".to_string(),
                    time_zone: "Europe/Berlin".to_string(),
                    budget: 800.0,
                    currency: "USD".to_string(),
                    venue_name: "City Hall".to_string(),
                    venue_address: None,
                    city: "Berlin".to_string(),
                    country: "DE".to_string(),
                    performance_duration: 90,
                    participant_count: 150,
                    includes_travel: false,
                    includes_accommodation: false,
                    includes_ground_transportation: false,
                    client: ClientContact {
                        first_name: "Dana".to_string(),
                        last_name: "Levi".to_string(),
                        email: "dana@example.com".to_string(),
                        phone: None,
                        company: None,
                    },
                    client_message: None,
                },
            )
            .await
            .unwrap();

        let chat = ChatService::new(db.clone());
        (db, artist, booking, chat)
    }

    #[tokio::test]
    async fn test_artist_sends_and_booker_reads() {
        let (db, artist, booking, chat) = setup().await;

        chat.send_as_artist(booking.id, &artist, "See you there")
            .await
            .unwrap();

        let thread = chat
            .read_as_booker(booking.id, &booking.chat_token)
            .await
            .unwrap();
        assert_eq!(thread.total_count, 1);
        assert_eq!(thread.messages[0].message.body, "See you there");
        assert_eq!(thread.messages[0].sender_name, "Nova Jones");
        assert!(!thread.messages[0].message.is_read);

        // The mark lands after the response is built.
        let stored = db.list_messages(booking.id).await.unwrap();
        assert!(stored[0].is_read);
    }

    #[tokio::test]
    async fn test_booker_send_requires_matching_token() {
        let (db, _artist, booking, chat) = setup().await;

        let sent = chat
            .send_as_booker(booking.id, &booking.chat_token, "What time works?")
            .await
            .unwrap();
        assert_eq!(sent.message.sender_type, SenderType::Booker);
        assert_eq!(sent.message.sender_user_id, None);
        assert_eq!(sent.sender_name, "Dana Levi");

        let result = chat
            .send_as_booker(booking.id, "forged-token", "still me")
            .await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));

        assert_eq!(db.list_messages(booking.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_token_does_not_open_other_bookings() {
        let (db, artist, booking, chat) = setup().await;

        let bookings = BookingService::new(
            db,
            RecordingNotifier::new(),
            "http://localhost:3000".to_string(),
        );
        let date = Utc::now().date_naive() + Duration::days(31);
        let other = bookings
            .create(
                artist.id,
                NewBookingRequest {
                    event_date: date.format("%Y-%m-%d").to_string(),
                    event_time: "21:00".to_string(),
                    time_zone: "Europe/Berlin".to_string(),
                    budget: 600.0,
                    currency: "USD".to_string(),
                    venue_name: "Club 9".to_string(),
                    venue_address: None,
                    city: "Berlin".to_string(),
                    country: "DE".to_string(),
                    performance_duration: 60,
                    participant_count: 80,
                    includes_travel: false,
                    includes_accommodation: false,
                    includes_ground_transportation: false,
                    client: ClientContact {
                        first_name: "Omer".to_string(),
                        last_name: "Katz".to_string(),
                        email: "omer@example.com".to_string(),
                        phone: None,
                        company: None,
                    },
                    client_message: None,
                },
            )
            .await
            .unwrap();

        let result = chat.read_as_booker(other.id, &booking.chat_token).await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));

        let result = chat
            .send_as_booker(other.id, &booking.chat_token, "hello")
            .await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));
    }

    #[tokio::test]
    async fn test_artist_read_marks_only_booker_messages() {
        let (db, artist, booking, chat) = setup().await;

        chat.send_as_artist(booking.id, &artist, "Hi").await.unwrap();
        chat.send_as_booker(booking.id, &booking.chat_token, "Hello")
            .await
            .unwrap();
        chat.send_as_booker(booking.id, &booking.chat_token, "Still there?")
            .await
            .unwrap();

        let thread = chat.read_as_artist(booking.id, &artist).await.unwrap();
        assert_eq!(thread.total_count, 3);
        assert!(
            thread.messages.iter().all(|m| !m.message.is_read),
            "first read reports the pre-mark flags"
        );

        let stored = db.list_messages(booking.id).await.unwrap();
        for message in &stored {
            match message.sender_type {
                SenderType::Booker => assert!(message.is_read),
                SenderType::Artist => assert!(!message.is_read),
            }
        }
    }

    #[tokio::test]
    async fn test_booker_read_marks_only_artist_messages() {
        let (db, artist, booking, chat) = setup().await;

        chat.send_as_artist(booking.id, &artist, "Hi").await.unwrap();
        chat.send_as_booker(booking.id, &booking.chat_token, "Hello")
            .await
            .unwrap();

        chat.read_as_booker(booking.id, &booking.chat_token)
            .await
            .unwrap();

        let stored = db.list_messages(booking.id).await.unwrap();
        for message in &stored {
            match message.sender_type {
                SenderType::Artist => assert!(message.is_read),
                SenderType::Booker => assert!(!message.is_read),
            }
        }
    }

    #[tokio::test]
    async fn test_second_read_sees_marked_flags() {
        let (_db, artist, booking, chat) = setup().await;

        chat.send_as_booker(booking.id, &booking.chat_token, "Hello")
            .await
            .unwrap();

        chat.read_as_artist(booking.id, &artist).await.unwrap();
        let second = chat.read_as_artist(booking.id, &artist).await.unwrap();
        assert!(second.messages[0].message.is_read);
    }

    #[tokio::test]
    async fn test_sender_names_resolve_per_party() {
        let (_db, artist, booking, chat) = setup().await;

        chat.send_as_artist(booking.id, &artist, "Hi").await.unwrap();
        chat.send_as_booker(booking.id, &booking.chat_token, "Hello")
            .await
            .unwrap();

        let thread = chat.read_as_artist(booking.id, &artist).await.unwrap();
        assert_eq!(thread.messages[0].sender_name, "Nova Jones");
        assert_eq!(thread.messages[1].sender_name, "Dana Levi");
    }

    #[tokio::test]
    async fn test_artist_access_is_owner_only() {
        let (db, artist, booking, chat) = setup().await;

        let other = db
            .upsert_user_by_email("other@example.com", "Other", Utc::now())
            .await
            .unwrap();

        let result = chat.read_as_artist(booking.id, &other).await;
        assert!(matches!(result, Err(BookingError::Forbidden)));

        let result = chat.send_as_artist(booking.id, &other, "mine now").await;
        assert!(matches!(result, Err(BookingError::Forbidden)));

        let result = chat.read_as_artist(BookingId(9999), &artist).await;
        assert!(matches!(result, Err(BookingError::BookingNotFound)));
    }
}
