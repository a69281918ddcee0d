use super::error_code::MutantErrorCode;
use super::{ConfigError, StoreError, ValidationError};

/// Top-level error for callers that drive validation, detection, and storage together.
#[derive(Debug, thiserror::Error)]
pub enum MutantError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MutantErrorCode for MutantError {
    fn error_code(&self) -> &'static str {
        match self {
            MutantError::Validation(e) => e.error_code(),
            MutantError::Store(e) => e.error_code(),
            MutantError::Config(e) => e.error_code(),
        }
    }
}

pub type MutantResult<T> = Result<T, MutantError>;
