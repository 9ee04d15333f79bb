//! Booking lifecycle.
//!
//! Creation runs a fixed validation sequence so a request failing several
//! checks always reports the same one: artist existence, then date, then
//! time, then availability, then budget, then the duplicate-slot check.
//! The duplicate pre-check is advisory; the store's partial unique index
//! is what actually holds under concurrent submissions.
//!
//! Post-commit side effects (seeding the chat with the client's message,
//! emailing the confirmation) are best effort: the booking is already
//! persisted, so their failures are logged and swallowed.

use crate::error::{BookingError, Result};
use artisthub_core::validate::{
    meets_minimum_price, parse_date, parse_event_date, parse_event_time,
};
use artisthub_core::{
    artist_display_name, booker_display_name, new_chat_token, ArtistProfile, BookingId,
    BookingRequest, BookingStatus, BookingUpdate, DomainError, NewBookingRequest, SenderType,
    User, UserId,
};
use artisthub_notify::{BookingConfirmation, BookingNotifier};
use artisthub_store::{BookingDraft, Database, StoreError};
use chrono::Utc;
use constant_time_eq::constant_time_eq;

/// Booking details plus the artist's display name, as shown on the
/// anonymous chat page.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingChatView {
    /// The booking itself.
    pub booking: BookingRequest,
    /// Artist display name: stage name when set, user name otherwise.
    pub artist_name: String,
}

/// Booking lifecycle service.
///
/// Cheap to clone; the pool and the notifier handle are shared.
#[derive(Clone)]
pub struct BookingService<N> {
    db: Database,
    notifier: N,
    frontend_url: String,
}

impl<N: BookingNotifier> BookingService<N> {
    /// Create a booking service.
    ///
    /// `frontend_url` is the base for the anonymous chat links embedded in
    /// confirmation emails, without a trailing slash.
    pub const fn new(db: Database, notifier: N, frontend_url: String) -> Self {
        Self {
            db,
            notifier,
            frontend_url,
        }
    }

    /// Create a booking request against an artist.
    ///
    /// Anyone may call this; the client is identified only by the contact
    /// fields in `request`. On success the booking is `pending`, carries a
    /// freshly minted chat token, and the client's message (if any) has been
    /// seeded into the chat.
    ///
    /// # Errors
    ///
    /// In order of evaluation: [`BookingError::ArtistNotFound`] when no
    /// profile exists for `artist_id`; [`BookingError::Domain`] for a
    /// malformed or non-future date or a malformed time;
    /// [`BookingError::ArtistUnavailable`] when the slot falls inside a
    /// calendar block; [`BookingError::BudgetTooLow`] when the offer is
    /// under the artist's minimum; [`BookingError::DuplicateBooking`] when
    /// a pending or accepted booking already holds the slot.
    pub async fn create(
        &self,
        artist_id: UserId,
        request: NewBookingRequest,
    ) -> Result<BookingRequest> {
        let Some(profile) = self.db.get_profile(artist_id).await? else {
            return Err(BookingError::ArtistNotFound);
        };

        let today = Utc::now().date_naive();
        let event_date = parse_event_date(&request.event_date, today)?;
        let event_time = parse_event_time(&request.event_time)?;

        if self.db.has_block(artist_id, event_date, event_time).await? {
            return Err(BookingError::ArtistUnavailable);
        }

        if !meets_minimum_price(request.budget, profile.min_price) {
            return Err(BookingError::BudgetTooLow {
                min_price: profile.min_price.unwrap_or_default(),
                currency: profile
                    .currency
                    .clone()
                    .unwrap_or_else(|| "USD".to_string()),
            });
        }

        if self
            .db
            .has_active_booking_at(artist_id, event_date, event_time)
            .await?
        {
            return Err(BookingError::DuplicateBooking);
        }

        let draft = BookingDraft {
            artist_id,
            event_date,
            event_time,
            time_zone: request.time_zone,
            budget: request.budget,
            currency: request.currency,
            venue_name: request.venue_name,
            venue_address: request.venue_address,
            city: request.city,
            country: request.country,
            performance_duration: request.performance_duration,
            participant_count: request.participant_count,
            includes_travel: request.includes_travel,
            includes_accommodation: request.includes_accommodation,
            includes_ground_transportation: request.includes_ground_transportation,
            client: request.client,
            client_message: request.client_message,
            chat_token: new_chat_token(),
        };

        let booking = match self.db.insert_booking(&draft, Utc::now()).await {
            Ok(booking) => booking,
            // The pre-check passed but the unique index fired: a concurrent
            // request won the slot.
            Err(StoreError::UniqueViolation(_)) => return Err(BookingError::DuplicateBooking),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            booking_id = %booking.id,
            artist_id = %booking.artist_id,
            event_date = %booking.event_date,
            "booking request created"
        );

        self.seed_initial_message(&booking).await;
        self.send_confirmation(&booking, &profile).await;

        Ok(booking)
    }

    /// Fetch a booking by id.
    ///
    /// Readable by the owning artist and by any authenticated user whose
    /// email equals the booking's client email.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] when the id is unknown and
    /// [`BookingError::Forbidden`] when the caller is neither party.
    pub async fn get(&self, id: BookingId, caller: &User) -> Result<BookingRequest> {
        let Some(booking) = self.db.get_booking(id).await? else {
            return Err(BookingError::BookingNotFound);
        };
        if !booking.is_owned_by(caller.id) && booking.client.email != caller.email {
            return Err(BookingError::Forbidden);
        }
        Ok(booking)
    }

    /// Fetch a booking through its chat token, for the anonymous client.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidChatToken`] when the booking does not
    /// exist or the token does not match it.
    pub async fn get_by_chat_token(
        &self,
        id: BookingId,
        chat_token: &str,
    ) -> Result<BookingChatView> {
        let Some(booking) = self.db.get_booking(id).await? else {
            return Err(BookingError::InvalidChatToken);
        };
        if !constant_time_eq(booking.chat_token.as_bytes(), chat_token.as_bytes()) {
            return Err(BookingError::InvalidChatToken);
        }

        let user_name = match self.db.get_user(booking.artist_id).await? {
            Some(user) => user.name,
            None => String::new(),
        };
        let profile = self.db.get_profile(booking.artist_id).await?;
        let stored = profile
            .as_ref()
            .map_or(user_name.as_str(), |p| p.display_name(&user_name));
        let artist_name = artist_display_name(Some(stored), None);

        Ok(BookingChatView {
            booking,
            artist_name,
        })
    }

    /// List an artist's bookings, newest event first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::OwnBookingsOnly`] when the caller asks for
    /// another artist's list.
    pub async fn list_for_artist(
        &self,
        artist_id: UserId,
        caller: &User,
    ) -> Result<Vec<BookingRequest>> {
        if caller.id != artist_id {
            return Err(BookingError::OwnBookingsOnly);
        }
        Ok(self.db.list_artist_bookings(artist_id).await?)
    }

    /// Apply a partial edit to a booking's event fields.
    ///
    /// Owner only. Dates parse without the future-date policy: rescheduling
    /// applies it at creation time only. An empty update returns the booking
    /// unchanged without touching `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`], [`BookingError::Forbidden`]
    /// or [`BookingError::Domain`] for unparseable date or time text.
    pub async fn update(
        &self,
        id: BookingId,
        caller: &User,
        update: BookingUpdate,
    ) -> Result<BookingRequest> {
        let Some(booking) = self.db.get_booking(id).await? else {
            return Err(BookingError::BookingNotFound);
        };
        if !booking.is_owned_by(caller.id) {
            return Err(BookingError::Forbidden);
        }
        if update.is_empty() {
            return Ok(booking);
        }

        let event_date = update.event_date.as_deref().map(parse_date).transpose()?;
        let event_time = update
            .event_time
            .as_deref()
            .map(parse_event_time)
            .transpose()?;

        let updated = self
            .db
            .update_booking_fields(
                id,
                event_date,
                event_time,
                update.performance_duration,
                update.budget,
                Utc::now(),
            )
            .await?;
        tracing::info!(booking_id = %id, "booking updated");
        Ok(updated)
    }

    /// Move a booking to `accepted`, `rejected` or `cancelled`.
    ///
    /// Owner only. `pending` is not a valid target; writing the current
    /// status again is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Domain`] with `InvalidStatus` for an unknown
    /// or `pending` target and `InvalidTransition` when the state machine
    /// forbids the move, plus the usual [`BookingError::BookingNotFound`]
    /// and [`BookingError::Forbidden`].
    pub async fn update_status(
        &self,
        id: BookingId,
        caller: &User,
        status_text: &str,
    ) -> Result<BookingRequest> {
        let Some(booking) = self.db.get_booking(id).await? else {
            return Err(BookingError::BookingNotFound);
        };
        if !booking.is_owned_by(caller.id) {
            return Err(BookingError::Forbidden);
        }

        let target: BookingStatus = status_text.parse()?;
        if target == BookingStatus::Pending {
            return Err(DomainError::InvalidStatus(status_text.to_string()).into());
        }
        booking.status.validate_transition(target)?;

        let updated = self.db.update_booking_status(id, target, Utc::now()).await?;
        tracing::info!(
            booking_id = %id,
            from = %booking.status,
            to = %target,
            "booking status changed"
        );
        Ok(updated)
    }

    /// Cancel a booking.
    ///
    /// Owner only; allowed from `pending` and `accepted`. The row is kept,
    /// cancellation is a status write.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Domain`] with `NotCancellable` from
    /// `rejected` or `cancelled`, plus [`BookingError::BookingNotFound`]
    /// and [`BookingError::Forbidden`].
    pub async fn cancel(&self, id: BookingId, caller: &User) -> Result<()> {
        let Some(booking) = self.db.get_booking(id).await? else {
            return Err(BookingError::BookingNotFound);
        };
        if !booking.is_owned_by(caller.id) {
            return Err(BookingError::Forbidden);
        }
        if !booking.status.is_cancellable() {
            return Err(DomainError::NotCancellable(booking.status).into());
        }

        self.db
            .update_booking_status(id, BookingStatus::Cancelled, Utc::now())
            .await?;
        tracing::info!(booking_id = %id, "booking cancelled");
        Ok(())
    }

    /// Seed the chat with the client's message, if one was submitted.
    async fn seed_initial_message(&self, booking: &BookingRequest) {
        let Some(message) = booking.client_message.as_deref() else {
            return;
        };
        if message.trim().is_empty() {
            return;
        }
        if let Err(error) = self
            .db
            .insert_message(booking.id, SenderType::Booker, None, message, Utc::now())
            .await
        {
            tracing::warn!(
                booking_id = %booking.id,
                %error,
                "failed to seed chat with client message"
            );
        }
    }

    /// Email the client a confirmation with the anonymous chat link.
    async fn send_confirmation(&self, booking: &BookingRequest, profile: &ArtistProfile) {
        let user_name = match self.db.get_user(booking.artist_id).await {
            Ok(Some(user)) => user.name,
            Ok(None) => String::new(),
            Err(error) => {
                tracing::warn!(
                    booking_id = %booking.id,
                    %error,
                    "failed to load artist for confirmation email"
                );
                String::new()
            }
        };
        let confirmation = BookingConfirmation {
            artist_name: artist_display_name(Some(profile.display_name(&user_name)), None),
            client_name: booker_display_name(&booking.client.first_name, &booking.client.last_name),
            client_email: booking.client.email.clone(),
            event_date: booking.event_date,
            event_time: booking.event_time,
            venue_name: booking.venue_name.clone(),
            city: booking.city.clone(),
            country: booking.country.clone(),
            budget: booking.budget,
            currency: booking.currency.clone(),
            chat_url: format!(
                "{}/chat/{}/{}",
                self.frontend_url, booking.id, booking.chat_token
            ),
        };

        if let Err(error) = self.notifier.send_booking_confirmation(&confirmation).await {
            tracing::warn!(
                booking_id = %booking.id,
                %error,
                "failed to send booking confirmation"
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use artisthub_core::{ClientContact, SocialLinks};
    use artisthub_notify::RecordingNotifier;
    use chrono::{Duration, NaiveDate, NaiveTime};

    async fn setup() -> (
        Database,
        User,
        BookingService<RecordingNotifier>,
        RecordingNotifier,
    ) {
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
            min_price: Some(500.0),
            currency: Some("USD".to_string()),
            photo: None,
            created_at: now,
            updated_at: now,
        };
        db.save_profile(&profile, now).await.unwrap();

        let notifier = RecordingNotifier::new();
        let service = BookingService::new(
            db.clone(),
            notifier.clone(),
            "http://localhost:3000".to_string(),
        );
        (db, artist, service, notifier)
    }

    fn future_date(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    fn request_for(date: NaiveDate, time: &str, budget: f64) -> NewBookingRequest {
        NewBookingRequest {
            event_date: date.format("%Y-%m-%d").to_string(),
            event_time: time.to_string(),
            time_zone: "Europe/Berlin".to_string(),
            budget,
            currency: "USD".to_string(),
            venue_name: "City Hall".to_string(),
            venue_address: None,
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            performance_duration: 90,
            participant_count: 150,
            includes_travel: true,
            includes_accommodation: false,
            includes_ground_transportation: false,
            client: ClientContact {
                first_name: "Dana".to_string(),
                last_name: "Levi".to_string(),
                email: "dana@example.com".to_string(),
                phone: None,
                company: None,
            },
            client_message: Some("Looking forward!".to_string()),
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn stranger(db: &Database) -> User {
        db.upsert_user_by_email("other@example.com", "Other", Utc::now())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_pending_booking() {
        let (_db, artist, service, _notifier) = setup().await;

        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.artist_id, artist.id);
        assert_eq!(booking.client.email, "dana@example.com");
        assert_eq!(booking.chat_token.len(), 36);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_artist() {
        let (_db, _artist, service, _notifier) = setup().await;

        let result = service
            .create(UserId(9999), request_for(future_date(30), "18:00", 800.0))
            .await;
        assert!(matches!(result, Err(BookingError::ArtistNotFound)));
    }

    #[tokio::test]
    async fn test_create_rejects_today_but_accepts_tomorrow() {
        let (_db, artist, service, _notifier) = setup().await;

        let result = service
            .create(artist.id, request_for(future_date(0), "18:00", 800.0))
            .await;
        assert!(matches!(
            result,
            Err(BookingError::Domain(DomainError::PastDate(_)))
        ));

        let booking = service
            .create(artist.id, request_for(future_date(1), "18:00", 800.0))
            .await
            .unwrap();
        assert_eq!(booking.event_date, future_date(1));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_date_and_time() {
        let (_db, artist, service, _notifier) = setup().await;

        let mut request = request_for(future_date(30), "18:00", 800.0);
        request.event_date = "06/02/2025".to_string();
        let result = service.create(artist.id, request).await;
        assert!(matches!(
            result,
            Err(BookingError::Domain(DomainError::InvalidDate(_)))
        ));

        let result = service
            .create(artist.id, request_for(future_date(30), "6pm", 800.0))
            .await;
        assert!(matches!(
            result,
            Err(BookingError::Domain(DomainError::InvalidTime(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_respects_calendar_blocks_inclusively() {
        let (db, artist, service, _notifier) = setup().await;
        let date = future_date(30);
        db.insert_calendar_block(artist.id, date, t(18, 0), t(20, 0), Some("own gig"))
            .await
            .unwrap();

        for time in ["18:00", "19:30", "20:00"] {
            let result = service.create(artist.id, request_for(date, time, 800.0)).await;
            assert!(
                matches!(result, Err(BookingError::ArtistUnavailable)),
                "{time} should be blocked"
            );
        }

        assert!(service
            .create(artist.id, request_for(date, "17:59", 800.0))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_enforces_minimum_price() {
        let (_db, artist, service, _notifier) = setup().await;

        let result = service
            .create(artist.id, request_for(future_date(30), "18:00", 499.99))
            .await;
        match result {
            Err(err @ BookingError::BudgetTooLow { .. }) => {
                assert_eq!(err.to_string(), "Budget must be at least 500 USD");
            }
            other => panic!("expected BudgetTooLow, got {other:?}"),
        }

        assert!(service
            .create(artist.id, request_for(future_date(30), "18:00", 500.0))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slot() {
        let (_db, artist, service, _notifier) = setup().await;
        let date = future_date(30);

        service
            .create(artist.id, request_for(date, "18:00", 800.0))
            .await
            .unwrap();

        let result = service.create(artist.id, request_for(date, "18:00", 900.0)).await;
        assert!(matches!(result, Err(BookingError::DuplicateBooking)));

        assert!(service
            .create(artist.id, request_for(date, "21:00", 800.0))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_availability_is_checked_before_budget() {
        let (db, artist, service, _notifier) = setup().await;
        let date = future_date(30);
        db.insert_calendar_block(artist.id, date, t(18, 0), t(20, 0), None)
            .await
            .unwrap();

        // Fails both checks; the block must win.
        let result = service.create(artist.id, request_for(date, "18:00", 100.0)).await;
        assert!(matches!(result, Err(BookingError::ArtistUnavailable)));
    }

    #[tokio::test]
    async fn test_create_seeds_chat_with_client_message() {
        let (db, artist, service, _notifier) = setup().await;

        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let messages = db.list_messages(booking.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_type, SenderType::Booker);
        assert_eq!(messages[0].sender_user_id, None);
        assert_eq!(messages[0].body, "Looking forward!");
        assert!(!messages[0].is_read);
    }

    #[tokio::test]
    async fn test_create_without_message_seeds_nothing() {
        let (db, artist, service, _notifier) = setup().await;

        let mut request = request_for(future_date(30), "18:00", 800.0);
        request.client_message = None;
        let booking = service.create(artist.id, request).await.unwrap();

        assert!(db.list_messages(booking.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sends_confirmation_with_chat_link() {
        let (_db, artist, service, notifier) = setup().await;

        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].artist_name, "DJ Nova");
        assert_eq!(sent[0].client_name, "Dana Levi");
        assert_eq!(sent[0].client_email, "dana@example.com");
        assert_eq!(
            sent[0].chat_url,
            format!(
                "http://localhost:3000/chat/{}/{}",
                booking.id, booking.chat_token
            )
        );
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_fail_create() {
        let db = Database::open_in_memory().await.expect("in-memory db");
        let now = Utc::now();
        let artist = db
            .upsert_user_by_email("artist@example.com", "Nova Jones", now)
            .await
            .unwrap();
        let profile = ArtistProfile {
            user_id: artist.id,
            stage_name: None,
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
        let service = BookingService::new(
            db,
            RecordingNotifier::failing(),
            "http://localhost:3000".to_string(),
        );

        let result = service
            .create(artist.id, request_for(future_date(30), "18:00", 100.0))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_allows_artist_and_client_email() {
        let (db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        assert!(service.get(booking.id, &artist).await.is_ok());

        let client = db
            .upsert_user_by_email("dana@example.com", "Dana", Utc::now())
            .await
            .unwrap();
        assert!(service.get(booking.id, &client).await.is_ok());

        let other = stranger(&db).await;
        assert!(matches!(
            service.get(booking.id, &other).await,
            Err(BookingError::Forbidden)
        ));

        assert!(matches!(
            service.get(BookingId(9999), &artist).await,
            Err(BookingError::BookingNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_requires_owning_artist() {
        let (db, artist, service, _notifier) = setup().await;
        service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let listed = service.list_for_artist(artist.id, &artist).await.unwrap();
        assert_eq!(listed.len(), 1);

        let other = stranger(&db).await;
        let result = service.list_for_artist(artist.id, &other).await;
        assert!(matches!(result, Err(BookingError::OwnBookingsOnly)));
    }

    #[tokio::test]
    async fn test_update_applies_partial_edit() {
        let (_db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let updated = service
            .update(
                booking.id,
                &artist,
                BookingUpdate {
                    budget: Some(950.0),
                    event_time: Some("19:30".to_string()),
                    ..BookingUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.budget, 950.0);
        assert_eq!(updated.event_time, t(19, 30));
        assert_eq!(updated.event_date, booking.event_date);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_input_and_strangers() {
        let (db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let result = service
            .update(
                booking.id,
                &artist,
                BookingUpdate {
                    event_date: Some("not-a-date".to_string()),
                    ..BookingUpdate::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(BookingError::Domain(DomainError::InvalidDate(_)))
        ));

        let other = stranger(&db).await;
        let result = service
            .update(booking.id, &other, BookingUpdate::default())
            .await;
        assert!(matches!(result, Err(BookingError::Forbidden)));

        let result = service
            .update(BookingId(9999), &artist, BookingUpdate::default())
            .await;
        assert!(matches!(result, Err(BookingError::BookingNotFound)));
    }

    #[tokio::test]
    async fn test_empty_update_leaves_booking_untouched() {
        let (_db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let unchanged = service
            .update(booking.id, &artist, BookingUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, booking);
    }

    #[tokio::test]
    async fn test_status_update_walks_the_state_machine() {
        let (_db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        let accepted = service
            .update_status(booking.id, &artist, "accepted")
            .await
            .unwrap();
        assert_eq!(accepted.status, BookingStatus::Accepted);

        // Repeating the current status is an idempotent no-op.
        assert!(service
            .update_status(booking.id, &artist, "accepted")
            .await
            .is_ok());

        let result = service.update_status(booking.id, &artist, "rejected").await;
        assert!(matches!(
            result,
            Err(BookingError::Domain(DomainError::InvalidTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn test_status_update_rejects_pending_and_unknown_targets() {
        let (_db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();

        for target in ["pending", "archived"] {
            let result = service.update_status(booking.id, &artist, target).await;
            assert!(
                matches!(
                    result,
                    Err(BookingError::Domain(DomainError::InvalidStatus(_)))
                ),
                "{target} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_cancel_from_pending_and_accepted() {
        let (_db, artist, service, _notifier) = setup().await;
        let date = future_date(30);

        let pending = service
            .create(artist.id, request_for(date, "18:00", 800.0))
            .await
            .unwrap();
        service.cancel(pending.id, &artist).await.unwrap();
        assert_eq!(
            service.get(pending.id, &artist).await.unwrap().status,
            BookingStatus::Cancelled
        );

        let accepted = service
            .create(artist.id, request_for(date, "21:00", 800.0))
            .await
            .unwrap();
        service
            .update_status(accepted.id, &artist, "accepted")
            .await
            .unwrap();
        service.cancel(accepted.id, &artist).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_from_rejected_fails() {
        let (_db, artist, service, _notifier) = setup().await;
        let booking = service
            .create(artist.id, request_for(future_date(30), "18:00", 800.0))
            .await
            .unwrap();
        service
            .update_status(booking.id, &artist, "rejected")
            .await
            .unwrap();

        let result = service.cancel(booking.id, &artist).await;
        match result {
            Err(err @ BookingError::Domain(DomainError::NotCancellable(_))) => {
                assert_eq!(
                    err.to_string(),
                    "Cannot cancel a booking with status rejected"
                );
            }
            other => panic!("expected NotCancellable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_token_resolves_only_its_own_booking() {
        let (_db, artist, service, _notifier) = setup().await;
        let date = future_date(30);
        let first = service
            .create(artist.id, request_for(date, "18:00", 800.0))
            .await
            .unwrap();
        let second = service
            .create(artist.id, request_for(date, "21:00", 800.0))
            .await
            .unwrap();

        let view = service
            .get_by_chat_token(first.id, &first.chat_token)
            .await
            .unwrap();
        assert_eq!(view.booking.id, first.id);
        assert_eq!(view.artist_name, "DJ Nova");

        // The right token for the wrong booking is still rejected.
        let result = service.get_by_chat_token(second.id, &first.chat_token).await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));

        let result = service.get_by_chat_token(first.id, "forged-token").await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));

        let result = service
            .get_by_chat_token(BookingId(9999), &first.chat_token)
            .await;
        assert!(matches!(result, Err(BookingError::InvalidChatToken)));
    }
}
