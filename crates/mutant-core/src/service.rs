//! Submission flow: validate, classify, store, answer from the stored record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::detector;
use crate::errors::MutantResult;
use crate::fingerprint::Fingerprint;
use crate::grid::Grid;
use crate::models::{DnaRecord, StatsReport, Verdict};
use crate::traits::RecordStore;

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Taken from the stored record, which may predate this submission.
    pub verdict: Verdict,
    pub record: DnaRecord,
}

/// Drives a `RecordStore` handle on behalf of a transport layer.
#[derive(Clone)]
pub struct MutantService {
    store: Arc<dyn RecordStore>,
}

impl MutantService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Validate and classify `rows`, then record them once.
    ///
    /// Structural errors are returned before the detector runs and nothing
    /// is stored for them.
    pub fn submit<S: AsRef<str>>(&self, rows: &[S]) -> MutantResult<Submission> {
        let grid = Grid::parse(rows)?;
        let is_mutant = detector::classify(grid.rows());
        let record = self.store.upsert_if_absent(&grid, is_mutant)?;
        if record.is_mutant != is_mutant {
            tracing::debug!(
                fingerprint = %record.fingerprint,
                stored = record.is_mutant,
                computed = is_mutant,
                "stored classification differs from recomputed one; keeping stored"
            );
        }
        Ok(Submission {
            verdict: record.verdict(),
            record,
        })
    }

    pub fn stats(&self) -> MutantResult<StatsReport> {
        Ok(self.store.statistics()?.report())
    }

    /// Look up a record by an externally supplied hex fingerprint.
    pub fn lookup(&self, fingerprint: &str) -> MutantResult<Option<DnaRecord>> {
        let fingerprint = Fingerprint::parse(fingerprint)?;
        Ok(self.store.find_by_fingerprint(&fingerprint)?)
    }
}
