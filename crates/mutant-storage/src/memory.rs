//! InMemoryRecordStore: a hash map behind one mutex.
//!
//! The check-then-insert runs entirely inside the critical section, so two
//! callers racing on one fingerprint can never both insert.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use mutant_core::errors::{StoreError, StoreResult};
use mutant_core::traits::{RecordStore, StoreBackend};
use mutant_core::{DnaRecord, Fingerprint, Grid, Statistics};

use crate::lifecycle::Lifecycle;
use crate::to_store_err;

#[derive(Default)]
struct MemoryTable {
    records: HashMap<Fingerprint, DnaRecord>,
    next_id: i64,
    mutant_count: u64,
    human_count: u64,
}

impl MemoryTable {
    fn insert(&mut self, fingerprint: Fingerprint, grid: &Grid, is_mutant: bool) -> DnaRecord {
        self.next_id += 1;
        let record = DnaRecord {
            id: self.next_id,
            fingerprint: fingerprint.clone(),
            dna: grid.clone(),
            is_mutant,
            created_at: Utc::now(),
        };
        if is_mutant {
            self.mutant_count += 1;
        } else {
            self.human_count += 1;
        }
        self.records.insert(fingerprint, record.clone());
        record
    }
}

/// Ephemeral record store. Contents are lost on shutdown.
pub struct InMemoryRecordStore {
    state: Mutex<Lifecycle<MemoryTable>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    fn with_table<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut MemoryTable) -> StoreResult<T>,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|_| to_store_err("memory store lock poisoned"))?;
        f(state.get_mut()?)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    fn initialize(&self) -> StoreResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| to_store_err("memory store lock poisoned"))?;
        match *state {
            Lifecycle::Open(_) => Ok(()),
            Lifecycle::Closed => Err(StoreError::Closed),
            Lifecycle::Uninitialized => {
                *state = Lifecycle::Open(MemoryTable::default());
                tracing::info!("in-memory record store initialized");
                Ok(())
            }
        }
    }

    fn upsert_if_absent(&self, grid: &Grid, is_mutant: bool) -> StoreResult<DnaRecord> {
        let fingerprint = Fingerprint::of(grid);
        self.with_table(|table| {
            if let Some(existing) = table.records.get(&fingerprint) {
                if existing.dna != *grid {
                    let err = StoreError::InvariantViolation {
                        fingerprint: fingerprint.to_string(),
                        details: format!("stored grid differs (record id {})", existing.id),
                    };
                    tracing::error!(%fingerprint, "{err}");
                    return Err(err);
                }
                tracing::trace!(id = existing.id, %fingerprint, "duplicate submission absorbed");
                return Ok(existing.clone());
            }
            let record = table.insert(fingerprint, grid, is_mutant);
            tracing::debug!(id = record.id, fingerprint = %record.fingerprint, is_mutant, "created dna record");
            Ok(record)
        })
    }

    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> StoreResult<Option<DnaRecord>> {
        self.with_table(|table| Ok(table.records.get(fingerprint).cloned()))
    }

    fn statistics(&self) -> StoreResult<Statistics> {
        self.with_table(|table| {
            Ok(Statistics::from_counts(
                table.mutant_count,
                table.human_count,
            ))
        })
    }

    fn shutdown(&self) -> StoreResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| to_store_err("memory store lock poisoned"))?;
        if let Some(table) = state.close() {
            tracing::info!(records = table.records.len(), "in-memory record store shut down");
        }
        Ok(())
    }
}
