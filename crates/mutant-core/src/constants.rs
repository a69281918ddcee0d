// Shared constants for detection and fingerprinting.

/// Canonical nucleotide alphabet, uppercase.
pub const ALPHABET: [u8; 4] = [b'A', b'T', b'C', b'G'];

/// Length of a qualifying run of identical symbols.
pub const SEQUENCE_LENGTH: usize = 4;

/// Number of qualifying runs that makes a grid mutant.
pub const MUTANT_THRESHOLD: usize = 2;

/// Domain tag mixed into every fingerprint. Bump the suffix when the
/// canonical serialization changes; persisted fingerprints depend on it.
pub const FINGERPRINT_DOMAIN: &str = "mutant-grid/v1";

/// Length of a hex-encoded fingerprint (BLAKE3, 32 bytes).
pub const FINGERPRINT_HEX_LEN: usize = 64;
