//! Configuration system.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod defaults;
pub mod mutant_config;
pub mod observability_config;
pub mod storage_config;

pub use mutant_config::MutantConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
