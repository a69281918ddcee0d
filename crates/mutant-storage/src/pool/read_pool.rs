//! Round-robin pool of read-only connections.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use mutant_core::config::defaults::MAX_READ_POOL_SIZE;
use mutant_core::errors::StoreResult;

use super::pragmas::apply_read_pragmas;
use crate::to_store_err;

/// Read-only connections to one database file. Under WAL they never wait on
/// the writer.
pub struct ReadPool {
    slots: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// `size` is clamped to `1..=MAX_READ_POOL_SIZE`.
    pub fn open(path: &Path, size: usize, busy_timeout: Duration) -> StoreResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let slots = (0..size.clamp(1, MAX_READ_POOL_SIZE))
            .map(|_| {
                let conn = Connection::open_with_flags(path, flags).map_err(to_store_err)?;
                apply_read_pragmas(&conn, busy_timeout)?;
                Ok(Mutex::new(conn))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next connection in turn.
    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let slot = &self.slots[self.cursor.fetch_add(1, Ordering::Relaxed) % self.slots.len()];
        let conn = slot
            .lock()
            .map_err(|_| to_store_err("reader lock poisoned"))?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }
}
