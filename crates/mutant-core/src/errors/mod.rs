//! Error handling for the mutant system.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod mutant_error;
pub mod store_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::MutantErrorCode;
pub use mutant_error::{MutantError, MutantResult};
pub use store_error::{StoreError, StoreResult};
pub use validation_error::ValidationError;
