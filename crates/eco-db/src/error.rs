//! Database error types for eco-db.

use eco_compliance::ValidationErrors;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A referenced row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Invalid state encountered (e.g., amending a submitted result).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness rule was violated.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Input failed domain validation before anything was written.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether this error came from a `UNIQUE` constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::LibSql(e) if e.to_string().contains("UNIQUE constraint failed"))
    }
}
