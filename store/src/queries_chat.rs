//! Chat message queries.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::MessageRow;
use artisthub_core::{BookingId, ChatMessage, MessageId, SenderType, UserId};
use chrono::{DateTime, Utc};

impl Database {
    /// Append a message to a booking's chat.
    ///
    /// Messages are immutable once written; `sender_user_id` is `NULL`
    /// for booker messages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    pub async fn insert_message(
        &self,
        booking_id: BookingId,
        sender_type: SenderType,
        sender_user_id: Option<UserId>,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<ChatMessage, StoreError> {
        let result = sqlx::query(
            "INSERT INTO chat_messages \
             (booking_id, sender_type, sender_user_id, body, created_at, is_read) \
             VALUES (?, ?, ?, ?, ?, 0)",
        )
        .bind(booking_id.0)
        .bind(sender_type.as_str())
        .bind(sender_user_id.map(|u| u.0))
        .bind(body)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(ChatMessage {
            id: MessageId(result.last_insert_rowid()),
            booking_id,
            sender_type,
            sender_user_id,
            body: body.to_string(),
            created_at: now,
            is_read: false,
        })
    }

    /// All messages for a booking, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn list_messages(&self, booking_id: BookingId) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT * FROM chat_messages WHERE booking_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(booking_id.0)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Mark all unread messages from `sender` as read, in one conditional
    /// UPDATE. Returns the number of rows flipped.
    ///
    /// Called when the *other* party fetches the thread; a single
    /// statement avoids per-row writes and lost updates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the update fails.
    pub async fn mark_messages_read(
        &self,
        booking_id: BookingId,
        sender: SenderType,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE chat_messages SET is_read = 1 \
             WHERE booking_id = ? AND sender_type = ? AND is_read = 0",
        )
        .bind(booking_id.0)
        .bind(sender.as_str())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
