//! Single write connection behind a mutex, plus BEGIN IMMEDIATE helper.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use mutant_core::errors::StoreResult;

use super::pragmas::apply_pragmas;
use crate::to_store_err;

/// A single write connection. All writes in this process are serialized
/// through it.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(to_store_err)?;
        let journal_mode = apply_pragmas(&conn, busy_timeout)?;
        tracing::debug!(path = %path.display(), %journal_mode, "opened writer connection");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory(busy_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_store_err)?;
        apply_pragmas(&conn, busy_timeout)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_store_err("write lock poisoned"))?;
        f(&guard)
    }
}

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// This acquires the database write lock at transaction start, so a second
/// process racing on the same file waits on busy_timeout instead of failing
/// mid-transaction. Dropping the transaction on an early return rolls back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> StoreResult<T>
where
    F: FnOnce(&Transaction<'_>) -> StoreResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_store_err(format!("failed to begin immediate transaction: {e}")))?;

    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| to_store_err(format!("failed to commit: {e}")))?;

    Ok(result)
}
