//! Uniqueness per fingerprint under concurrent submitters.

use std::sync::{Arc, Barrier};
use std::thread;

use mutant_core::traits::RecordStore;
use mutant_core::Grid;
use mutant_storage::{InMemoryRecordStore, SqliteRecordStore};

const THREADS: usize = 8;

fn race_same_grid(store: Arc<dyn RecordStore>) {
    store.initialize().unwrap();
    let grid = Grid::parse(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = Arc::clone(&store);
            let grid = grid.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Alternate the claimed classification; only the winner's sticks.
                store.upsert_if_absent(&grid, i % 2 == 0).unwrap()
            })
        })
        .collect();

    let records: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &records[0];
    assert!(records.iter().all(|r| r == first), "all callers see the same record");

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total(), 1);
    store.shutdown().unwrap();
}

#[test]
fn memory_store_creates_one_record_under_race() {
    race_same_grid(Arc::new(InMemoryRecordStore::new()));
}

#[test]
fn sqlite_memory_store_creates_one_record_under_race() {
    race_same_grid(Arc::new(SqliteRecordStore::in_memory()));
}

#[test]
fn sqlite_file_store_creates_one_record_under_race() {
    let dir = tempfile::tempdir().unwrap();
    race_same_grid(Arc::new(SqliteRecordStore::open(dir.path().join("dna.sqlite"))));
}

#[test]
fn distinct_grids_from_many_threads_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::open(dir.path().join("dna.sqlite")));
    store.initialize().unwrap();

    let alphabet = ['A', 'T', 'C', 'G'];
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for k in 0..4 {
                    // 2x2 grid keyed by (t, k); distinct for every pair.
                    let n = t * 4 + k;
                    let rows = [
                        format!("{}{}", alphabet[n % 4], alphabet[(n / 4) % 4]),
                        format!("{}{}", alphabet[(n / 16) % 4], alphabet[0]),
                    ];
                    let grid = Grid::parse(&rows).unwrap();
                    store.upsert_if_absent(&grid, false).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.statistics().unwrap().human_count, (THREADS * 4) as u64);
    store.shutdown().unwrap();
}
