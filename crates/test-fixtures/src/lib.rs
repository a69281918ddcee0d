//! Test fixture loader for golden grid datasets shared across crates.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// A grid with a known number of qualifying windows.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenGrid {
    pub name: String,
    pub dna: Vec<String>,
    pub sequences: usize,
}

/// A grid that fails structural validation.
#[derive(Debug, Clone, Deserialize)]
pub struct MalformedGrid {
    pub name: String,
    pub dna: Vec<String>,
    /// One of `empty`, `not_square`, `invalid_symbol`.
    pub error: String,
}

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Grids the detector must classify as mutant.
pub fn mutant_grids() -> Vec<GoldenGrid> {
    load_fixture("golden/detector/mutant.json")
}

/// Grids the detector must classify as human.
pub fn human_grids() -> Vec<GoldenGrid> {
    load_fixture("golden/detector/human.json")
}

/// Grids that fail validation.
pub fn malformed_grids() -> Vec<MalformedGrid> {
    load_fixture("golden/detector/malformed.json")
}

/// Look up a golden grid by name across the mutant and human sets.
///
/// # Panics
/// Panics if no grid has that name.
pub fn golden_grid(name: &str) -> GoldenGrid {
    mutant_grids()
        .into_iter()
        .chain(human_grids())
        .find(|g| g.name == name)
        .unwrap_or_else(|| panic!("No golden grid named {name}"))
}
