//! Ordered, idempotent schema migrations tracked in `schema_version`.

pub mod v001_dna_records;

use rusqlite::{params, Connection};

use mutant_core::errors::{StoreError, StoreResult};

use crate::pool::with_immediate_transaction;
use crate::to_store_err;

const SCHEMA_VERSION_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";

/// All migrations, in application order.
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_dna_records::MIGRATION_SQL)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the database's current version.
/// Returns the number of migrations applied (0 on an up-to-date database).
pub fn run_migrations(conn: &Connection) -> StoreResult<usize> {
    conn.execute_batch(SCHEMA_VERSION_SQL)
        .map_err(|e| StoreError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        })?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS {
        let ran = with_immediate_transaction(conn, |tx| {
            // Re-read inside the write lock: another process may have
            // migrated between our check and our BEGIN.
            if current_version(tx)? >= version {
                return Ok(false);
            }
            tx.execute_batch(sql).map_err(|e| StoreError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| StoreError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
            Ok(true)
        })?;
        if ran {
            tracing::info!(version, "applied schema migration");
            applied += 1;
        }
    }
    Ok(applied)
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> StoreResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_store_err)
}
