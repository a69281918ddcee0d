//! Insert-or-ignore and point lookup for dna_records.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use mutant_core::errors::{StoreError, StoreResult};
use mutant_core::{DnaRecord, Fingerprint, Grid};

use crate::to_store_err;

/// A dna_records row as stored, before decoding.
#[derive(Debug, Clone)]
pub struct DnaRecordRow {
    pub id: i64,
    pub fingerprint: String,
    pub dna: String,
    pub is_mutant: i64,
    pub created_at: String,
}

impl DnaRecordRow {
    /// Decode into a record. Any undecodable column is a corrupt row.
    pub fn into_record(self) -> StoreResult<DnaRecord> {
        let id = self.id;
        let corrupt = |details: String| StoreError::CorruptRecord { id, details };

        let fingerprint = Fingerprint::parse(&self.fingerprint)
            .map_err(|e| corrupt(format!("fingerprint: {e}")))?;
        let dna: Grid =
            serde_json::from_str(&self.dna).map_err(|e| corrupt(format!("dna: {e}")))?;
        let is_mutant = match self.is_mutant {
            0 => false,
            1 => true,
            other => return Err(corrupt(format!("is_mutant: {other}"))),
        };
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| corrupt(format!("created_at: {e}")))?
            .with_timezone(&Utc);

        Ok(DnaRecord {
            id,
            fingerprint,
            dna,
            is_mutant,
            created_at,
        })
    }
}

/// Insert a record unless its fingerprint already exists.
/// Returns `true` when this call created the row.
pub fn insert_if_absent(
    conn: &Connection,
    fingerprint: &Fingerprint,
    dna_json: &str,
    is_mutant: bool,
    created_at: DateTime<Utc>,
) -> StoreResult<bool> {
    let changed = conn
        .prepare_cached(
            "INSERT INTO dna_records (fingerprint, dna, is_mutant, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(fingerprint) DO NOTHING",
        )
        .map_err(to_store_err)?
        .execute(params![
            fingerprint.as_str(),
            dna_json,
            is_mutant,
            created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])
        .map_err(to_store_err)?;

    match changed {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(StoreError::InvariantViolation {
            fingerprint: fingerprint.to_string(),
            details: format!("single-row insert changed {n} rows"),
        }),
    }
}

/// Fetch the raw row for a fingerprint.
pub fn get_row_by_fingerprint(
    conn: &Connection,
    fingerprint: &Fingerprint,
) -> StoreResult<Option<DnaRecordRow>> {
    conn.prepare_cached(
        "SELECT id, fingerprint, dna, is_mutant, created_at
         FROM dna_records WHERE fingerprint = ?1",
    )
    .map_err(to_store_err)?
    .query_row(params![fingerprint.as_str()], |row| {
        Ok(DnaRecordRow {
            id: row.get(0)?,
            fingerprint: row.get(1)?,
            dna: row.get(2)?,
            is_mutant: row.get(3)?,
            created_at: row.get(4)?,
        })
    })
    .optional()
    .map_err(to_store_err)
}

/// Fetch and decode the record for a fingerprint.
pub fn get_by_fingerprint(
    conn: &Connection,
    fingerprint: &Fingerprint,
) -> StoreResult<Option<DnaRecord>> {
    get_row_by_fingerprint(conn, fingerprint)?
        .map(DnaRecordRow::into_record)
        .transpose()
}
