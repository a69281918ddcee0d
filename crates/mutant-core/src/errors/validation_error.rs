//! Structural input errors.

use super::error_code::{self, MutantErrorCode};

/// A grid (or externally supplied key) that fails shape or alphabet checks.
/// These never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("grid is empty")]
    EmptyGrid,

    #[error("grid is not square: row {row} has length {actual}, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid symbol {symbol:?} at row {row}, column {column}")]
    InvalidSymbol {
        row: usize,
        column: usize,
        symbol: char,
    },

    #[error("malformed fingerprint: {value:?}")]
    MalformedFingerprint { value: String },
}

impl MutantErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
