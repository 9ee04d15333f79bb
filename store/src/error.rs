//! Store error type.

use thiserror::Error;

/// Failures from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure while preparing the database path.
    #[error("I/O error: {0}")]
    Io(String),

    /// Could not open or connect to the database.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Embedded migrations failed to apply.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A query failed for a reason other than a constraint violation.
    #[error("Query error: {0}")]
    Query(String),

    /// A stored value no longer maps to its domain type.
    #[error("Corrupt row: {0}")]
    Decode(String),

    /// The requested row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the write. For booking inserts this is
    /// the active-slot index firing under a concurrent duplicate.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(db_err.message().to_string());
            }
        }
        Self::Query(e.to_string())
    }
}

impl From<artisthub_core::DomainError> for StoreError {
    fn from(e: artisthub_core::DomainError) -> Self {
        Self::Decode(e.to_string())
    }
}
