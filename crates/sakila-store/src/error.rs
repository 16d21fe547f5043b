//! Error types for the data-access layer.

use rusqlite::ffi;

/// Errors that can occur while reading or writing rental data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database operation failed unexpectedly.
    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    /// The request referenced rows that do not satisfy the schema.
    #[error("{0}")]
    InvalidInput(String),

    /// The row the request targets does not exist or is in the wrong state.
    #[error("{0}")]
    NotFound(String),

    /// No inventory copy can satisfy the request.
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// Classifies a failed write: foreign-key violations become
    /// [`StoreError::InvalidInput`] carrying `message`, anything else stays a
    /// database error.
    pub(crate) fn on_write(message: &str) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |err| {
            let foreign_key = matches!(
                &err,
                rusqlite::Error::SqliteFailure(code, _)
                    if code.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
            );
            if foreign_key {
                tracing::warn!(error = %err, "write rejected by foreign key");
                Self::InvalidInput(message.to_string())
            } else {
                Self::Database(err)
            }
        }
    }
}
