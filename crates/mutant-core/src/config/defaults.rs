// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_PATH: &str = "data/dna.sqlite";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const MAX_READ_POOL_SIZE: usize = 8;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";

// --- Resolution ---
pub const PROJECT_CONFIG_FILENAME: &str = "mutant.toml";
