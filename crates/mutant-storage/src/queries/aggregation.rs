//! Classification counts.

use rusqlite::Connection;

use mutant_core::errors::StoreResult;
use mutant_core::Statistics;

use crate::to_store_err;

/// Mutant and human counts from a single statement, so both numbers come
/// from the same read snapshot.
pub fn statistics(conn: &Connection) -> StoreResult<Statistics> {
    let (mutant, human): (i64, i64) = conn
        .prepare_cached(
            "SELECT
                COALESCE(SUM(CASE WHEN is_mutant = 1 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN is_mutant = 0 THEN 1 ELSE 0 END), 0)
             FROM dna_records",
        )
        .map_err(to_store_err)?
        .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(to_store_err)?;
    Ok(Statistics::from_counts(mutant as u64, human as u64))
}
