//! Artist profile queries.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::{genres_to_text, ProfileRow};
use artisthub_core::{ArtistProfile, UserId};
use chrono::{DateTime, Utc};

impl Database {
    /// Fetch an artist profile by owning user id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the stored social
    /// links no longer parse.
    pub async fn get_profile(&self, user_id: UserId) -> Result<Option<ArtistProfile>, StoreError> {
        let row =
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM artist_profiles WHERE user_id = ?")
                .bind(user_id.0)
                .fetch_optional(self.pool())
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Whether a user has an artist profile; bookings may only target such
    /// users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    pub async fn artist_exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM artist_profiles WHERE user_id = ?")
                .bind(user_id.0)
                .fetch_one(self.pool())
                .await?;

        Ok(count > 0)
    }

    /// Write a full profile, creating the row on first save.
    ///
    /// Lazy creation lives here as an upsert: the service loads (or
    /// defaults) the profile, applies the caller's partial edits, and
    /// saves the whole thing back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write or read-back fails.
    pub async fn save_profile(
        &self,
        profile: &ArtistProfile,
        now: DateTime<Utc>,
    ) -> Result<ArtistProfile, StoreError> {
        sqlx::query(
            "INSERT INTO artist_profiles \
             (user_id, stage_name, bio, genres, social_links, min_price, currency, photo, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(user_id) DO UPDATE SET \
             stage_name = excluded.stage_name, bio = excluded.bio, genres = excluded.genres, \
             social_links = excluded.social_links, min_price = excluded.min_price, \
             currency = excluded.currency, photo = excluded.photo, updated_at = excluded.updated_at",
        )
        .bind(profile.user_id.0)
        .bind(&profile.stage_name)
        .bind(&profile.bio)
        .bind(genres_to_text(&profile.genres))
        .bind(profile.social_links.to_json())
        .bind(profile.min_price)
        .bind(&profile.currency)
        .bind(&profile.photo)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_profile(profile.user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("artist profile {}", profile.user_id)))
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use artisthub_core::SocialLinks;

    async fn db_with_user() -> (Database, UserId) {
        let db = Database::open_in_memory().await.unwrap();
        let user = db
            .upsert_user_by_email("artist@example.com", "Artist", Utc::now())
            .await
            .unwrap();
        (db, user.id)
    }

    fn profile(user_id: UserId) -> ArtistProfile {
        ArtistProfile {
            user_id,
            stage_name: Some("DJ Nova".to_string()),
            bio: Some("Plays everything".to_string()),
            genres: vec!["jazz".to_string(), "funk".to_string()],
            social_links: SocialLinks {
                instagram: Some("https://instagram.com/djnova".to_string()),
                ..SocialLinks::default()
            },
            min_price: Some(500.0),
            currency: Some("USD".to_string()),
            photo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_creates_and_roundtrips() {
        let (db, user_id) = db_with_user().await;

        assert!(db.get_profile(user_id).await.unwrap().is_none());
        assert!(!db.artist_exists(user_id).await.unwrap());

        let saved = db.save_profile(&profile(user_id), Utc::now()).await.unwrap();
        assert_eq!(saved.stage_name.as_deref(), Some("DJ Nova"));
        assert_eq!(saved.genres, vec!["jazz", "funk"]);
        assert_eq!(
            saved.social_links.instagram.as_deref(),
            Some("https://instagram.com/djnova")
        );
        assert!(db.artist_exists(user_id).await.unwrap());
    }

    #[tokio::test]
    async fn save_twice_updates_in_place() {
        let (db, user_id) = db_with_user().await;

        db.save_profile(&profile(user_id), Utc::now()).await.unwrap();

        let mut edited = profile(user_id);
        edited.min_price = Some(750.0);
        edited.genres = vec!["house".to_string()];
        let saved = db.save_profile(&edited, Utc::now()).await.unwrap();

        assert_eq!(saved.min_price, Some(750.0));
        assert_eq!(saved.genres, vec!["house"]);
    }
}
