//! SQL for the dna_records table.

pub mod aggregation;
pub mod dna_records;
