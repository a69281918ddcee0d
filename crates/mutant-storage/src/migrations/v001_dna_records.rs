//! V001: dna_records, one row per distinct grid keyed by fingerprint.

pub const MIGRATION_SQL: &str = r#"
-- Fingerprint uniqueness is the deduplication invariant; the UNIQUE
-- constraint is what ON CONFLICT DO NOTHING resolves against.
CREATE TABLE IF NOT EXISTS dna_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fingerprint TEXT NOT NULL UNIQUE,
    dna TEXT NOT NULL,
    is_mutant INTEGER NOT NULL CHECK (is_mutant IN (0, 1)),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
) STRICT;

-- Aggregate counting filters on the classification.
CREATE INDEX IF NOT EXISTS idx_dna_records_is_mutant
    ON dna_records(is_mutant);
"#;
