//! Connection settings for the writer and the readers.

use std::time::Duration;

use rusqlite::Connection;

use mutant_core::errors::StoreResult;

use crate::to_store_err;

/// Writer settings: WAL journal, NORMAL sync, temp tables in memory.
///
/// Returns the journal mode SQLite actually selected, which is `memory`
/// rather than `wal` for an in-memory database.
pub fn apply_pragmas(conn: &Connection, busy_timeout: Duration) -> StoreResult<String> {
    conn.busy_timeout(busy_timeout).map_err(to_store_err)?;
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(to_store_err)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(to_store_err)?;
    conn.pragma_update(None, "temp_store", "MEMORY")
        .map_err(to_store_err)?;
    Ok(mode)
}

/// Reader settings. Journal mode is a property of the file, set by the writer.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout: Duration) -> StoreResult<()> {
    conn.busy_timeout(busy_timeout).map_err(to_store_err)?;
    conn.pragma_update(None, "query_only", true)
        .map_err(to_store_err)
}

/// Current journal mode, lowercased.
pub fn journal_mode(conn: &Connection) -> StoreResult<String> {
    conn.pragma_query_value(None, "journal_mode", |row| row.get::<_, String>(0))
        .map(|mode| mode.to_ascii_lowercase())
        .map_err(to_store_err)
}

pub fn is_wal(conn: &Connection) -> StoreResult<bool> {
    Ok(journal_mode(conn)? == "wal")
}
