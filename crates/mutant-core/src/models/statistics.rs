use serde::{Deserialize, Serialize};

/// Aggregate counts over the current record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mutant_count: u64,
    pub human_count: u64,
    /// `mutant / human`; 1 when only mutants exist; 0 when empty.
    pub ratio: f64,
}

impl Statistics {
    pub fn from_counts(mutant_count: u64, human_count: u64) -> Self {
        let ratio = if human_count > 0 {
            mutant_count as f64 / human_count as f64
        } else if mutant_count > 0 {
            1.0
        } else {
            0.0
        };
        Self {
            mutant_count,
            human_count,
            ratio,
        }
    }

    pub fn total(&self) -> u64 {
        self.mutant_count + self.human_count
    }

    /// Reporting payload with the ratio rounded to two decimals.
    pub fn report(&self) -> StatsReport {
        StatsReport {
            count_mutant_dna: self.mutant_count,
            count_human_dna: self.human_count,
            ratio: (self.ratio * 100.0).round() / 100.0,
        }
    }
}

/// Wire shape surfaced to reporting clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    pub ratio: f64,
}
