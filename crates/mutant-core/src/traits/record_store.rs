use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, StoreResult};
use crate::fingerprint::Fingerprint;
use crate::grid::Grid;
use crate::models::{DnaRecord, Statistics};

/// Content-addressed, idempotent record storage.
///
/// Lifecycle: `initialize()` opens the scope, `shutdown()` closes it. Both
/// are idempotent. Queries outside the scope fail with
/// `StoreError::NotInitialized` or `StoreError::Closed`.
pub trait RecordStore: Send + Sync {
    fn backend(&self) -> StoreBackend;

    /// Prepare backing storage (directories, schema, indexes).
    fn initialize(&self) -> StoreResult<()>;

    /// Insert a record for `grid` unless its fingerprint already exists.
    /// On a duplicate the existing record is returned unchanged and
    /// `is_mutant` is ignored. Exactly one record is created per fingerprint
    /// under any interleaving of concurrent callers.
    fn upsert_if_absent(&self, grid: &Grid, is_mutant: bool) -> StoreResult<DnaRecord>;

    /// Point lookup. Absent is `Ok(None)`.
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> StoreResult<Option<DnaRecord>>;

    /// Counts drawn from one consistent snapshot of the record set.
    fn statistics(&self) -> StoreResult<Statistics>;

    /// Release backing resources.
    fn shutdown(&self) -> StoreResult<()>;
}

/// Which engine backs a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Durable SQLite database.
    #[default]
    Sqlite,
    /// Ephemeral hash map.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Sqlite => f.write_str("sqlite"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                message: format!("unknown backend {other:?}, expected sqlite or memory"),
            }),
        }
    }
}
