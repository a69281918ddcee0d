//! Submission flow end to end over real backings.

use std::sync::Arc;

use mutant_core::config::StorageConfig;
use mutant_core::errors::{MutantError, MutantErrorCode, ValidationError};
use mutant_core::traits::RecordStore;
use mutant_core::{Fingerprint, Grid, MutantService, Verdict};
use mutant_storage::{open_store, SqliteRecordStore};

const MUTANT: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
const HUMAN: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"];

fn service() -> MutantService {
    MutantService::new(open_store(&StorageConfig::in_memory()).unwrap())
}

#[test]
fn reference_grids_get_their_verdicts() {
    let svc = service();
    assert_eq!(svc.submit(&MUTANT).unwrap().verdict, Verdict::Mutant);
    assert_eq!(svc.submit(&HUMAN).unwrap().verdict, Verdict::Human);

    let report = svc.stats().unwrap();
    assert_eq!(report.count_mutant_dna, 1);
    assert_eq!(report.count_human_dna, 1);
    assert_eq!(report.ratio, 1.0);
}

#[test]
fn stats_ratio_is_rounded_in_report() {
    let svc = service();
    svc.submit(&MUTANT).unwrap();
    for rows in [["AT", "CG"], ["TA", "GC"], ["CC", "GG"]] {
        svc.submit(&rows).unwrap();
    }
    let report = svc.stats().unwrap();
    assert_eq!(report.count_human_dna, 3);
    assert_eq!(report.ratio, 0.33);
}

#[test]
fn malformed_grids_are_rejected_and_not_stored() {
    let svc = service();
    for malformed in test_fixtures::malformed_grids() {
        let err = svc.submit(&malformed.dna).unwrap_err();
        assert!(
            matches!(err, MutantError::Validation(_)),
            "{}: {err:?}",
            malformed.name
        );
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
    assert_eq!(svc.stats().unwrap().count_human_dna, 0);
}

#[test]
fn non_square_grid_reports_row() {
    let svc = service();
    let err = svc.submit(&["ATG", "CA", "TTA"]).unwrap_err();
    assert!(matches!(
        err,
        MutantError::Validation(ValidationError::NotSquare {
            row: 1,
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn stored_verdict_wins_over_recomputation() {
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::in_memory());
    store.initialize().unwrap();
    let grid = Grid::parse(&MUTANT).unwrap();
    store.upsert_if_absent(&grid, false).unwrap();

    let svc = MutantService::new(Arc::clone(&store));
    let submission = svc.submit(&MUTANT).unwrap();
    assert_eq!(submission.verdict, Verdict::Human);
    assert!(!submission.record.is_mutant);
    store.shutdown().unwrap();
}

#[test]
fn lookup_accepts_hex_and_rejects_garbage() {
    let svc = service();
    let created = svc.submit(&MUTANT).unwrap().record;
    let hex = Fingerprint::of(&Grid::parse(&MUTANT).unwrap()).to_string();

    let found = svc.lookup(&hex.to_uppercase()).unwrap().expect("present");
    assert_eq!(found, created);

    assert!(svc.lookup(&"0".repeat(64)).unwrap().is_none());
    assert!(matches!(
        svc.lookup("not-a-fingerprint"),
        Err(MutantError::Validation(ValidationError::MalformedFingerprint { .. }))
    ));
}

#[test]
fn store_errors_surface_through_service() {
    let store = open_store(&StorageConfig::in_memory()).unwrap();
    let svc = MutantService::new(Arc::clone(&store));
    store.shutdown().unwrap();
    let err = svc.stats().unwrap_err();
    assert_eq!(err.error_code(), "STORE_CLOSED");
}
