//! MutantErrorCode trait for surfacing errors through a transport.

/// Every error enum implements this to provide a stable, structured error
/// code string for whatever transport sits in front of the core.
pub trait MutantErrorCode {
    /// Returns the error code string (e.g., "STORE_CLOSED").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORE_INIT_FAILED: &str = "STORE_INIT_FAILED";
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
pub const STORE_NOT_INITIALIZED: &str = "STORE_NOT_INITIALIZED";
pub const STORE_CLOSED: &str = "STORE_CLOSED";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const STORE_CORRUPT: &str = "STORE_CORRUPT";
pub const STORE_INVARIANT: &str = "STORE_INVARIANT";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
