//! Mutant detector: counts runs of four identical symbols along rows,
//! columns, and both diagonals.
//!
//! Every cell is a candidate run start. For each of the four directions the
//! walk extends at most three steps, so a window is registered exactly when
//! four identical symbols line up from that start. A run of five therefore
//! registers twice (two overlapping windows), one run of four registers once.
//! A grid is mutant once two windows have been registered.

use crate::constants::{ALPHABET, MUTANT_THRESHOLD, SEQUENCE_LENGTH};

/// Right, down, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Classify a grid as mutant (`true`) or not.
///
/// Total and side-effect free. Malformed input (empty, non-square, any
/// symbol outside uppercase `{A,T,C,G}`) yields `false`; callers must
/// validate with [`crate::Grid::parse`] before reading `false` as "human".
pub fn classify<S: AsRef<str>>(rows: &[S]) -> bool {
    match canonical_matrix(rows) {
        Some(matrix) => scan(&matrix, MUTANT_THRESHOLD) >= MUTANT_THRESHOLD,
        None => false,
    }
}

/// Count every qualifying window without short-circuiting.
/// Malformed input counts as zero.
pub fn count_sequences<S: AsRef<str>>(rows: &[S]) -> usize {
    canonical_matrix(rows).map_or(0, |matrix| scan(&matrix, usize::MAX))
}

fn canonical_matrix<S: AsRef<str>>(rows: &[S]) -> Option<Vec<&[u8]>> {
    let n = rows.len();
    if n == 0 {
        return None;
    }
    let matrix: Vec<&[u8]> = rows.iter().map(|row| row.as_ref().as_bytes()).collect();
    if matrix.iter().any(|row| row.len() != n) {
        return None;
    }
    if matrix
        .iter()
        .flat_map(|row| row.iter())
        .any(|symbol| !ALPHABET.contains(symbol))
    {
        return None;
    }
    Some(matrix)
}

/// Scan all (cell, direction) pairs, stopping once `stop_at` windows are found.
fn scan(matrix: &[&[u8]], stop_at: usize) -> usize {
    let n = matrix.len();
    let mut found = 0;
    for i in 0..n {
        for j in 0..n {
            let symbol = matrix[i][j];
            for &(di, dj) in &DIRECTIONS {
                if window_matches(matrix, i, j, di, dj, symbol) {
                    found += 1;
                    if found >= stop_at {
                        return found;
                    }
                }
            }
        }
    }
    found
}

fn window_matches(
    matrix: &[&[u8]],
    i: usize,
    j: usize,
    di: isize,
    dj: isize,
    symbol: u8,
) -> bool {
    let n = matrix.len() as isize;
    (1..SEQUENCE_LENGTH as isize).all(|step| {
        let row = i as isize + di * step;
        let col = j as isize + dj * step;
        (0..n).contains(&row)
            && (0..n).contains(&col)
            && matrix[row as usize][col as usize] == symbol
    })
}
