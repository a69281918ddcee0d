//! Connection management: write-serialized + read-pooled.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::Connection;

use mutant_core::errors::StoreResult;

pub use read_pool::ReadPool;
pub use write_connection::{with_immediate_transaction, WriteConnection};

/// Manages the single write connection and, for file-backed databases,
/// the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` for in-memory databases: each in-memory connection is its own
    /// database, so reads go through the writer.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(
        path: &std::path::Path,
        read_pool_size: usize,
        busy_timeout: Duration,
    ) -> StoreResult<Self> {
        let writer = WriteConnection::open(path, busy_timeout)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database with no separate readers.
    pub fn open_in_memory(busy_timeout: Duration) -> StoreResult<Self> {
        let writer = WriteConnection::open_in_memory(busy_timeout)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer.
    pub fn with_reader<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        match &self.readers {
            Some(readers) => readers.with_conn(f),
            None => self.writer.with_conn(f),
        }
    }

    /// Run a WAL checkpoint (TRUNCATE mode) so the main file is self-contained.
    pub fn checkpoint(&self) -> StoreResult<()> {
        if self.db_path.is_none() {
            return Ok(());
        }
        self.writer.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(crate::to_store_err)
        })
    }
}
