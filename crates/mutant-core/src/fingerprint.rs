//! Content fingerprint: the sole deduplication key of the record store.
//!
//! BLAKE3 over a versioned, length-prefixed serialization of the ordered
//! rows. Row order is part of the identity, and the encoding is stable
//! across processes because persisted records outlive a single run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FINGERPRINT_DOMAIN, FINGERPRINT_HEX_LEN};
use crate::errors::ValidationError;
use crate::grid::Grid;

/// Lowercase hex BLAKE3 digest of a grid's canonical serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a validated grid.
    pub fn of(grid: &Grid) -> Self {
        Self::of_rows(grid.rows())
    }

    /// Fingerprint raw rows without validating them.
    pub fn of_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(FINGERPRINT_DOMAIN.as_bytes());
        hasher.update(&(rows.len() as u64).to_le_bytes());
        for row in rows {
            let bytes = row.as_ref().as_bytes();
            hasher.update(&(bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Accept an externally supplied fingerprint (e.g. a lookup key).
    /// Uppercase hex is normalized.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.len() != FINGERPRINT_HEX_LEN
            || !normalized.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ValidationError::MalformedFingerprint {
                value: value.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Fingerprint::parse(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::parse(rows).unwrap()
    }

    #[test]
    fn deterministic() {
        let a = Fingerprint::of(&grid(&["ATGC", "CAGT", "TTAT", "AGAA"]));
        let b = Fingerprint::of(&grid(&["ATGC", "CAGT", "TTAT", "AGAA"]));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), FINGERPRINT_HEX_LEN);
    }

    #[test]
    fn row_order_matters() {
        let a = Fingerprint::of(&grid(&["AC", "GT"]));
        let b = Fingerprint::of(&grid(&["GT", "AC"]));
        assert_ne!(a, b);
    }

    #[test]
    fn row_boundaries_matter() {
        // Same concatenated bytes, different split.
        assert_ne!(
            Fingerprint::of_rows(&["AB", "C"]),
            Fingerprint::of_rows(&["A", "BC"])
        );
    }

    #[test]
    fn case_normalized_grids_share_a_fingerprint() {
        assert_eq!(
            Fingerprint::of(&grid(&["ac", "gt"])),
            Fingerprint::of(&grid(&["AC", "GT"]))
        );
    }

    #[test]
    fn parse_round_trips_and_normalizes_case() {
        let fp = Fingerprint::of(&grid(&["A"]));
        let upper = fp.as_str().to_ascii_uppercase();
        assert_eq!(Fingerprint::parse(&upper).unwrap(), fp);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Fingerprint::parse("abc").is_err());
        assert!(Fingerprint::parse(&"z".repeat(FINGERPRINT_HEX_LEN)).is_err());
    }
}
