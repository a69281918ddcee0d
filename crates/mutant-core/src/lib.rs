//! # mutant-core
//!
//! Foundation crate for the mutant detection system.
//! Defines the grid type, the detector, fingerprinting, the record store
//! contract, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod fingerprint;
pub mod grid;
pub mod models;
pub mod service;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::MutantConfig;
pub use detector::{classify, count_sequences};
pub use errors::{MutantError, MutantResult, StoreError, StoreResult, ValidationError};
pub use fingerprint::Fingerprint;
pub use grid::Grid;
pub use models::{DnaRecord, Statistics, StatsReport, Verdict};
pub use service::{MutantService, Submission};
pub use traits::{RecordStore, StoreBackend};
