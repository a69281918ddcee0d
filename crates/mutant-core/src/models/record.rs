use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::grid::Grid;

/// A stored classification. Created once per fingerprint, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaRecord {
    /// Monotonically assigned per store instance.
    pub id: i64,
    pub fingerprint: Fingerprint,
    /// Rows exactly as first submitted (after case normalization).
    pub dna: Grid,
    /// Classification of the first-ever submission; authoritative forever.
    pub is_mutant: bool,
    pub created_at: DateTime<Utc>,
}

impl DnaRecord {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_is_mutant(self.is_mutant)
    }
}

/// The caller-facing outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Mutant,
    Human,
}

impl Verdict {
    pub fn from_is_mutant(is_mutant: bool) -> Self {
        if is_mutant {
            Verdict::Mutant
        } else {
            Verdict::Human
        }
    }

    pub fn is_mutant(self) -> bool {
        matches!(self, Verdict::Mutant)
    }
}
