//! Database error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found (or not owned by the caller - indistinguishable by design)
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input rejected by validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transcript rejected by structural validation
    #[error("malformed transcript: {0}")]
    Transcript(#[from] journal_core::TranscriptError),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
