//! The NxN nucleotide grid and its caller-side validation.

use serde::{Deserialize, Serialize};

use crate::constants::ALPHABET;
use crate::detector;
use crate::errors::ValidationError;

/// A structurally valid grid: non-empty, square, canonical uppercase
/// `{A,T,C,G}` rows. The only way to build one is through [`Grid::parse`],
/// so a `Grid` can always be handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    rows: Vec<String>,
}

impl Grid {
    /// Normalize rows to uppercase, then check shape and alphabet.
    ///
    /// Shape is checked for every row before any symbol is inspected, so a
    /// grid that is both ragged and misspelled reports `NotSquare`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::EmptyGrid);
        }
        let expected = rows.len();
        let normalized: Vec<String> = rows
            .iter()
            .map(|row| row.as_ref().to_ascii_uppercase())
            .collect();

        for (row, symbols) in normalized.iter().enumerate() {
            let actual = symbols.chars().count();
            if actual != expected {
                return Err(ValidationError::NotSquare {
                    row,
                    expected,
                    actual,
                });
            }
        }

        for (row, symbols) in normalized.iter().enumerate() {
            if let Some((column, symbol)) = symbols
                .chars()
                .enumerate()
                .find(|(_, c)| !c.is_ascii() || !ALPHABET.contains(&(*c as u8)))
            {
                return Err(ValidationError::InvalidSymbol {
                    row,
                    column,
                    symbol,
                });
            }
        }

        Ok(Self { rows: normalized })
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Run the detector over this grid.
    pub fn is_mutant(&self) -> bool {
        detector::classify(&self.rows)
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = ValidationError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Grid::parse(&rows)
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}
