//! SqliteRecordStore: owns the ConnectionPool, implements RecordStore,
//! runs migrations on initialize and checkpoints the WAL on shutdown.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use chrono::Utc;

use mutant_core::config::defaults::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_READ_POOL_SIZE};
use mutant_core::config::StorageConfig;
use mutant_core::errors::{StoreError, StoreResult};
use mutant_core::traits::{RecordStore, StoreBackend};
use mutant_core::{DnaRecord, Fingerprint, Grid, Statistics};

use crate::lifecycle::Lifecycle;
use crate::pool::ConnectionPool;
use crate::queries::{aggregation, dna_records};
use crate::{migrations, to_store_err};

const MEMORY_PATH: &str = ":memory:";

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private SQLite in-memory database, gone after shutdown.
    Memory,
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::File(path) => write!(f, "{}", path.display()),
            StoreLocation::Memory => f.write_str(MEMORY_PATH),
        }
    }
}

/// SQLite-backed record store. Uniqueness per fingerprint is enforced by the
/// `UNIQUE` constraint plus `ON CONFLICT DO NOTHING`, and every write goes
/// through the single writer connection.
pub struct SqliteRecordStore {
    location: StoreLocation,
    busy_timeout: Duration,
    read_pool_size: usize,
    state: RwLock<Lifecycle<ConnectionPool>>,
}

impl SqliteRecordStore {
    /// A file-backed store. Nothing is touched until `initialize()`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_location(StoreLocation::File(path.as_ref().to_path_buf()))
    }

    /// A store on a private in-memory database.
    pub fn in_memory() -> Self {
        Self::with_location(StoreLocation::Memory)
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        let location = if config.db_path == MEMORY_PATH {
            StoreLocation::Memory
        } else {
            StoreLocation::File(PathBuf::from(&config.db_path))
        };
        Self {
            location,
            busy_timeout: Duration::from_millis(u64::from(config.busy_timeout_ms)),
            read_pool_size: config.read_pool_size,
            state: RwLock::new(Lifecycle::Uninitialized),
        }
    }

    fn with_location(location: StoreLocation) -> Self {
        Self {
            location,
            busy_timeout: Duration::from_millis(u64::from(DEFAULT_BUSY_TIMEOUT_MS)),
            read_pool_size: DEFAULT_READ_POOL_SIZE,
            state: RwLock::new(Lifecycle::Uninitialized),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Applied schema version of the open database.
    pub fn schema_version(&self) -> StoreResult<u32> {
        self.with_pool(|pool| pool.writer.with_conn(migrations::current_version))
    }

    /// Number of connections serving reads (0 when reads share the writer).
    pub fn read_pool_size(&self) -> StoreResult<usize> {
        self.with_pool(|pool| Ok(pool.readers.as_ref().map_or(0, |r| r.size())))
    }

    fn with_pool<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&ConnectionPool) -> StoreResult<T>,
    {
        let state = self
            .state
            .read()
            .map_err(|_| to_store_err("store state lock poisoned"))?;
        f(state.get()?)
    }

    fn open_pool(&self) -> StoreResult<ConnectionPool> {
        let init_err = |reason: String| StoreError::InitializationFailed {
            location: self.location.to_string(),
            reason,
        };

        let pool = match &self.location {
            StoreLocation::Memory => ConnectionPool::open_in_memory(self.busy_timeout),
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        init_err(format!("cannot create {}: {e}", parent.display()))
                    })?;
                }
                ConnectionPool::open(path, self.read_pool_size, self.busy_timeout)
            }
        }
        .map_err(|e| match e {
            StoreError::Unavailable { message } => init_err(message),
            other => other,
        })?;

        pool.writer
            .with_conn(migrations::run_migrations)
            .map_err(|e| match e {
                StoreError::Unavailable { message } => init_err(message),
                other => other,
            })?;
        Ok(pool)
    }
}

impl RecordStore for SqliteRecordStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    fn initialize(&self) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| to_store_err("store state lock poisoned"))?;
        match *state {
            Lifecycle::Open(_) => return Ok(()),
            Lifecycle::Closed => return Err(StoreError::Closed),
            Lifecycle::Uninitialized => {}
        }
        let pool = self.open_pool()?;
        *state = Lifecycle::Open(pool);
        tracing::info!(location = %self.location, "sqlite record store initialized");
        Ok(())
    }

    fn upsert_if_absent(&self, grid: &Grid, is_mutant: bool) -> StoreResult<DnaRecord> {
        let fingerprint = Fingerprint::of(grid);
        let dna_json = serde_json::to_string(grid)?;

        self.with_pool(|pool| {
            pool.writer.with_conn(|conn| {
                let created = dna_records::insert_if_absent(
                    conn,
                    &fingerprint,
                    &dna_json,
                    is_mutant,
                    Utc::now(),
                )?;

                let record = match dna_records::get_by_fingerprint(conn, &fingerprint)? {
                    Some(record) => record,
                    None => {
                        let err = StoreError::InvariantViolation {
                            fingerprint: fingerprint.to_string(),
                            details: "record missing after insert-or-ignore".to_string(),
                        };
                        tracing::error!(%fingerprint, "{err}");
                        return Err(err);
                    }
                };

                if record.dna != *grid {
                    let err = StoreError::InvariantViolation {
                        fingerprint: fingerprint.to_string(),
                        details: format!("stored grid differs (record id {})", record.id),
                    };
                    tracing::error!(%fingerprint, "{err}");
                    return Err(err);
                }

                if created {
                    tracing::debug!(id = record.id, %fingerprint, is_mutant, "created dna record");
                } else {
                    tracing::trace!(id = record.id, %fingerprint, "duplicate submission absorbed");
                }
                Ok(record)
            })
        })
    }

    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> StoreResult<Option<DnaRecord>> {
        self.with_pool(|pool| {
            pool.with_reader(|conn| dna_records::get_by_fingerprint(conn, fingerprint))
        })
    }

    fn statistics(&self) -> StoreResult<Statistics> {
        self.with_pool(|pool| pool.with_reader(aggregation::statistics))
    }

    fn shutdown(&self) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| to_store_err("store state lock poisoned"))?;
        if let Some(pool) = state.close() {
            if let Err(e) = pool.checkpoint() {
                tracing::warn!(location = %self.location, error = %e, "wal checkpoint failed at shutdown");
            }
            drop(pool);
            tracing::info!(location = %self.location, "sqlite record store shut down");
        }
        Ok(())
    }
}

impl fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("location", &self.location)
            .field("busy_timeout", &self.busy_timeout)
            .field("read_pool_size", &self.read_pool_size)
            .finish_non_exhaustive()
    }
}
