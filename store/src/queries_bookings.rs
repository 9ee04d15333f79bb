//! Booking queries.
//!
//! The duplicate-slot guarantee lives here, not in application code: the
//! partial unique index over `(artist_id, event_date, event_time)` for
//! `pending`/`accepted` rows makes the insert itself the arbiter, so two
//! concurrent creates for the same slot cannot both land. The service
//! layer's pre-check only produces a friendlier error message first.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::{BookingDraft, BookingRow};
use artisthub_core::{BookingId, BookingRequest, BookingStatus, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

impl Database {
    /// Insert a new booking with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when the active-slot index
    /// rejects a duplicate, [`StoreError`] for other failures.
    pub async fn insert_booking(
        &self,
        draft: &BookingDraft,
        now: DateTime<Utc>,
    ) -> Result<BookingRequest, StoreError> {
        let result = sqlx::query(
            "INSERT INTO booking_requests \
             (artist_id, event_date, event_time, time_zone, budget, currency, \
              venue_name, venue_address, city, country, performance_duration, \
              participant_count, includes_travel, includes_accommodation, \
              includes_ground_transportation, client_first_name, client_last_name, \
              client_email, client_phone, client_company, client_message, status, \
              chat_token, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
                     'pending', ?, ?, ?)",
        )
        .bind(draft.artist_id.0)
        .bind(draft.event_date)
        .bind(draft.event_time)
        .bind(&draft.time_zone)
        .bind(draft.budget)
        .bind(&draft.currency)
        .bind(&draft.venue_name)
        .bind(&draft.venue_address)
        .bind(&draft.city)
        .bind(&draft.country)
        .bind(draft.performance_duration)
        .bind(draft.participant_count)
        .bind(draft.includes_travel)
        .bind(draft.includes_accommodation)
        .bind(draft.includes_ground_transportation)
        .bind(&draft.client.first_name)
        .bind(&draft.client.last_name)
        .bind(&draft.client.email)
        .bind(&draft.client.phone)
        .bind(&draft.client.company)
        .bind(&draft.client_message)
        .bind(&draft.chat_token)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(BookingRequest {
            id: BookingId(result.last_insert_rowid()),
            artist_id: draft.artist_id,
            event_date: draft.event_date,
            event_time: draft.event_time,
            time_zone: draft.time_zone.clone(),
            budget: draft.budget,
            currency: draft.currency.clone(),
            venue_name: draft.venue_name.clone(),
            venue_address: draft.venue_address.clone(),
            city: draft.city.clone(),
            country: draft.country.clone(),
            performance_duration: draft.performance_duration,
            participant_count: draft.participant_count,
            includes_travel: draft.includes_travel,
            includes_accommodation: draft.includes_accommodation,
            includes_ground_transportation: draft.includes_ground_transportation,
            client: draft.client.clone(),
            client_message: draft.client_message.clone(),
            status: BookingStatus::Pending,
            chat_token: draft.chat_token.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a booking by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row fails to
    /// decode.
    pub async fn get_booking(&self, id: BookingId) -> Result<Option<BookingRequest>, StoreError> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM booking_requests WHERE id = ?")
            .bind(id.0)
            .fetch_optional(self.pool())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// All bookings for an artist, newest event first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn list_artist_bookings(
        &self,
        artist_id: UserId,
    ) -> Result<Vec<BookingRequest>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM booking_requests WHERE artist_id = ? ORDER BY event_date DESC",
        )
        .bind(artist_id.0)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Apply artist edits to a booking; `None` fields keep their stored
    /// value (COALESCE in SQL, one atomic statement).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the booking does not exist,
    /// [`StoreError`] for query failures.
    pub async fn update_booking_fields(
        &self,
        id: BookingId,
        event_date: Option<NaiveDate>,
        event_time: Option<NaiveTime>,
        performance_duration: Option<i64>,
        budget: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<BookingRequest, StoreError> {
        let result = sqlx::query(
            "UPDATE booking_requests SET \
             event_date = COALESCE(?, event_date), \
             event_time = COALESCE(?, event_time), \
             performance_duration = COALESCE(?, performance_duration), \
             budget = COALESCE(?, budget), \
             updated_at = ? \
             WHERE id = ?",
        )
        .bind(event_date)
        .bind(event_time)
        .bind(performance_duration)
        .bind(budget)
        .bind(now)
        .bind(id.0)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("booking {id}")));
        }

        self.get_booking(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("booking {id}")))
    }

    /// Set a booking's status.
    ///
    /// State-machine checks happen in the service before this runs; here
    /// the write is unconditional.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the booking does not exist,
    /// [`StoreError`] for query failures.
    pub async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<BookingRequest, StoreError> {
        let result =
            sqlx::query("UPDATE booking_requests SET status = ?, updated_at = ? WHERE id = ?")
                .bind(status.as_str())
                .bind(now)
                .bind(id.0)
                .execute(self.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("booking {id}")));
        }

        self.get_booking(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("booking {id}")))
    }

    /// Whether an active (`pending` or `accepted`) booking already holds
    /// this artist slot. Pre-check only; the unique index is the arbiter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn has_active_booking_at(
        &self,
        artist_id: UserId,
        event_date: NaiveDate,
        event_time: NaiveTime,
    ) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM booking_requests \
             WHERE artist_id = ? AND event_date = ? AND event_time = ? \
             AND status IN ('pending', 'accepted')",
        )
        .bind(artist_id.0)
        .bind(event_date)
        .bind(event_time)
        .fetch_one(self.pool())
        .await?;

        Ok(count > 0)
    }
}
