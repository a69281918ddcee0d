//! # mutant-storage
//!
//! Two interchangeable `RecordStore` backings:
//! - [`SqliteRecordStore`]: durable SQLite file (or SQLite in-memory database)
//!   with a serialized writer, a read pool, WAL, and versioned migrations.
//! - [`InMemoryRecordStore`]: ephemeral hash map behind one mutex.
//!
//! Fingerprinting lives in `mutant-core` and is shared by both.

pub mod engine;
mod lifecycle;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;

use std::sync::Arc;

use mutant_core::config::StorageConfig;
use mutant_core::errors::{StoreError, StoreResult};
use mutant_core::traits::{RecordStore, StoreBackend};

pub use engine::{SqliteRecordStore, StoreLocation};
pub use memory::InMemoryRecordStore;

/// Build the configured backing and run `initialize()` on it.
///
/// The caller owns the returned handle and must call `shutdown()` on it.
pub fn open_store(config: &StorageConfig) -> StoreResult<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteRecordStore::from_config(config)),
        StoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
    };
    store.initialize()?;
    Ok(store)
}

/// Map a backing-engine failure to the runtime "unavailable" condition.
pub(crate) fn to_store_err(message: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable {
        message: message.to_string(),
    }
}
