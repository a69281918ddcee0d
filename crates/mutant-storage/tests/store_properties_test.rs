//! Property tests: idempotent upsert and consistent counts over random grids.

use std::collections::HashSet;

use proptest::prelude::*;

use mutant_core::traits::RecordStore;
use mutant_core::{classify, Fingerprint, Grid};
use mutant_storage::{InMemoryRecordStore, SqliteRecordStore};

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..=6).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec!['A', 'T', 'C', 'G']), n)
                .prop_map(|row| row.into_iter().collect::<String>()),
            n,
        )
        .prop_map(|rows| Grid::parse(&rows).unwrap())
    })
}

fn fresh_stores() -> Vec<Box<dyn RecordStore>> {
    let memory: Box<dyn RecordStore> = Box::new(InMemoryRecordStore::new());
    let sqlite: Box<dyn RecordStore> = Box::new(SqliteRecordStore::in_memory());
    vec![memory, sqlite]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_upsert_is_idempotent(grid in grid_strategy(), flip in any::<bool>()) {
        for store in fresh_stores() {
            store.initialize().unwrap();
            let is_mutant = classify(grid.rows());
            let first = store.upsert_if_absent(&grid, is_mutant).unwrap();
            let second = store.upsert_if_absent(&grid, is_mutant ^ flip).unwrap();

            prop_assert_eq!(&second, &first);
            prop_assert_eq!(first.is_mutant, is_mutant);
            prop_assert_eq!(&first.dna, &grid);
            let found = store.find_by_fingerprint(&Fingerprint::of(&grid)).unwrap();
            prop_assert_eq!(found.as_ref(), Some(&first));
            prop_assert_eq!(store.statistics().unwrap().total(), 1);
            store.shutdown().unwrap();
        }
    }

    #[test]
    fn prop_counts_match_distinct_grids(
        grids in prop::collection::vec(grid_strategy(), 1..24)
    ) {
        let mut seen = HashSet::new();
        let mut mutants = 0u64;
        let mut humans = 0u64;
        for grid in &grids {
            if seen.insert(Fingerprint::of(grid)) {
                if classify(grid.rows()) {
                    mutants += 1;
                } else {
                    humans += 1;
                }
            }
        }

        for store in fresh_stores() {
            store.initialize().unwrap();
            // Submit everything twice; the second pass must change nothing.
            for grid in grids.iter().chain(grids.iter()) {
                store.upsert_if_absent(grid, classify(grid.rows())).unwrap();
            }
            let stats = store.statistics().unwrap();
            prop_assert_eq!(stats.mutant_count, mutants);
            prop_assert_eq!(stats.human_count, humans);
            store.shutdown().unwrap();
        }
    }
}
