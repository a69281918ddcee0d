//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::{ObservabilityConfig, StorageConfig};
use crate::errors::ConfigError;
use crate::traits::StoreBackend;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MUTANT_*`, plus legacy `SQLITE_FILE`)
/// 2. Project config (`mutant.toml` in the working root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MutantConfig {
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl MutantConfig {
    /// Load configuration for a working root, reading the process environment.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(root, |key| std::env::var(key).ok())
    }

    /// Same as [`MutantConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(root: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `MUTANT_*` overrides. `MUTANT_DB_PATH` wins over `SQLITE_FILE`.
    pub fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = env("MUTANT_STORE_BACKEND") {
            self.storage.backend = backend.parse::<StoreBackend>()?;
        }
        if let Some(path) = env("MUTANT_DB_PATH").or_else(|| env("SQLITE_FILE")) {
            self.storage.db_path = path;
        }
        if let Some(timeout) = env("MUTANT_BUSY_TIMEOUT_MS") {
            self.storage.busy_timeout_ms =
                timeout.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "storage.busy_timeout_ms".to_string(),
                    message: format!("not a number: {timeout:?}"),
                })?;
        }
        if let Some(level) = env("MUTANT_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=defaults::MAX_READ_POOL_SIZE).contains(&self.storage.read_pool_size) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: format!("must be between 1 and {}", defaults::MAX_READ_POOL_SIZE),
            });
        }
        if self.storage.busy_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.busy_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.storage.backend == StoreBackend::Sqlite && self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty for the sqlite backend".to_string(),
            });
        }
        Ok(())
    }
}
