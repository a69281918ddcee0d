//! Record store errors.

use super::error_code::{self, MutantErrorCode};

/// Errors raised by a `RecordStore` backing.
///
/// "Not found" is never an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing resource could not be prepared. Fatal to store construction.
    #[error("store initialization failed at {location}: {reason}")]
    InitializationFailed { location: String, reason: String },

    /// The backing resource failed at query time (closed connection, I/O error).
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("store used before initialize()")]
    NotInitialized,

    #[error("store closed")]
    Closed,

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// A persisted row could not be decoded back into a record.
    #[error("corrupt record {id}: {details}")]
    CorruptRecord { id: i64, details: String },

    /// Fingerprint uniqueness was broken outside the insert-or-ignore path.
    #[error("store invariant violated for fingerprint {fingerprint}: {details}")]
    InvariantViolation {
        fingerprint: String,
        details: String,
    },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl StoreError {
    /// Whether the caller may retry the same operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

impl MutantErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::InitializationFailed { .. } => error_code::STORE_INIT_FAILED,
            StoreError::Unavailable { .. } => error_code::STORE_UNAVAILABLE,
            StoreError::NotInitialized => error_code::STORE_NOT_INITIALIZED,
            StoreError::Closed => error_code::STORE_CLOSED,
            StoreError::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            StoreError::CorruptRecord { .. } => error_code::STORE_CORRUPT,
            StoreError::InvariantViolation { .. } => error_code::STORE_INVARIANT,
            StoreError::Serialization { .. } => error_code::SERIALIZATION_ERROR,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
