//! Persisted and derived data models.

pub mod record;
pub mod statistics;

pub use record::{DnaRecord, Verdict};
pub use statistics::{Statistics, StatsReport};
