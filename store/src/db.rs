//! SQLite database handle.

use crate::error::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Shared handle to the booking platform database.
///
/// Cheap to clone; all query methods live in the `queries_*` modules as
/// `impl Database` blocks.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database at `path` and apply
    /// migrations.
    ///
    /// WAL journal mode and a busy timeout keep concurrent request
    /// handlers from tripping over SQLite's writer lock; foreign keys are
    /// enforced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the parent directory cannot be created,
    /// the connection fails, or migrations fail to apply.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))
                .map_err(|e| StoreError::Connection(e.to_string()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .foreign_keys(true)
                .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(path = %path.display(), "Booking database opened");

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Open a fresh in-memory database with migrations applied.
    ///
    /// A single connection keeps the database alive and shared; used by
    /// tests and available for ephemeral development runs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the connection or migrations fail.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        info!("Booking database migrations complete");
        Ok(())
    }

    /// Liveness probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the database does not respond.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// The underlying connection pool.
    pub(crate) fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
