//! Calendar block queries.
//!
//! Booking validation consumes these read-only; block management has no
//! HTTP surface in this core, but the writes exist for tooling and tests.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::BlockRow;
use artisthub_core::{CalendarBlock, UserId};
use chrono::{NaiveDate, NaiveTime};

impl Database {
    /// Record an artist unavailability interval.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    pub async fn insert_calendar_block(
        &self,
        artist_id: UserId,
        block_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        reason: Option<&str>,
    ) -> Result<CalendarBlock, StoreError> {
        let result = sqlx::query(
            "INSERT INTO calendar_blocks (artist_id, block_date, start_time, end_time, reason) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(artist_id.0)
        .bind(block_date)
        .bind(start_time)
        .bind(end_time)
        .bind(reason)
        .execute(self.pool())
        .await?;

        Ok(CalendarBlock {
            id: result.last_insert_rowid(),
            artist_id,
            block_date,
            start_time,
            end_time,
            reason: reason.map(ToString::to_string),
        })
    }

    /// All blocks for an artist on a date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn blocks_for_date(
        &self,
        artist_id: UserId,
        block_date: NaiveDate,
    ) -> Result<Vec<CalendarBlock>, StoreError> {
        let rows = sqlx::query_as::<_, BlockRow>(
            "SELECT * FROM calendar_blocks WHERE artist_id = ? AND block_date = ?",
        )
        .bind(artist_id.0)
        .bind(block_date)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Whether any block covers `time` on `date` for this artist.
    ///
    /// Interval bounds are inclusive on both ends, so a booking at exactly
    /// a block's start or end is unavailable. The inclusivity check runs in
    /// domain code rather than SQL text comparison.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn has_block(
        &self,
        artist_id: UserId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, StoreError> {
        let blocks = self.blocks_for_date(artist_id, date).await?;
        Ok(blocks.iter().any(|block| block.covers(time)))
    }
}
