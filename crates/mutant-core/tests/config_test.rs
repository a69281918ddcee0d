use std::collections::HashMap;

use mutant_core::config::{defaults, MutantConfig, StorageConfig};
use mutant_core::errors::ConfigError;
use mutant_core::StoreBackend;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_sane() {
    let config = MutantConfig::default();
    assert_eq!(config.storage.backend, StoreBackend::Sqlite);
    assert_eq!(config.storage.db_path, defaults::DEFAULT_DB_PATH);
    assert_eq!(config.storage.read_pool_size, defaults::DEFAULT_READ_POOL_SIZE);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn from_toml_partial_sections_keep_defaults() {
    let config = MutantConfig::from_toml(
        r#"
        [storage]
        backend = "memory"
        "#,
    )
    .unwrap();
    assert_eq!(config.storage.backend, StoreBackend::Memory);
    assert_eq!(config.storage.busy_timeout_ms, defaults::DEFAULT_BUSY_TIMEOUT_MS);
}

#[test]
fn from_toml_rejects_invalid_toml() {
    let err = MutantConfig::from_toml("[storage\nbackend = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn from_toml_rejects_unknown_backend() {
    assert!(MutantConfig::from_toml("[storage]\nbackend = \"redis\"").is_err());
}

#[test]
fn project_file_is_read_from_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mutant.toml"),
        "[storage]\ndb_path = \"custom/records.db\"\nread_pool_size = 2\n",
    )
    .unwrap();

    let config = MutantConfig::load_with_env(dir.path(), env_from(&[])).unwrap();
    assert_eq!(config.storage.db_path, "custom/records.db");
    assert_eq!(config.storage.read_pool_size, 2);
}

#[test]
fn unreadable_project_file_is_a_parse_error_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mutant.toml"), [0xff, 0xfe, b'[', 0x80]).unwrap();

    let err = MutantConfig::load_with_env(dir.path(), env_from(&[])).unwrap_err();
    match err {
        ConfigError::ParseError { path, message } => {
            assert!(path.ends_with("mutant.toml"), "{path}");
            assert!(!message.is_empty());
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn project_config_path_that_is_a_directory_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("mutant.toml")).unwrap();

    let err = MutantConfig::load_with_env(dir.path(), env_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "{err:?}");
}

#[test]
fn env_overrides_project_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mutant.toml"),
        "[storage]\ndb_path = \"from-file.db\"\n",
    )
    .unwrap();

    let config = MutantConfig::load_with_env(
        dir.path(),
        env_from(&[
            ("MUTANT_DB_PATH", "from-env.db"),
            ("MUTANT_STORE_BACKEND", "Memory"),
            ("MUTANT_LOG_LEVEL", "debug"),
        ]),
    )
    .unwrap();
    assert_eq!(config.storage.db_path, "from-env.db");
    assert_eq!(config.storage.backend, StoreBackend::Memory);
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn legacy_sqlite_file_env_is_honoured_below_mutant_db_path() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = MutantConfig::load_with_env(dir.path(), env_from(&[("SQLITE_FILE", "legacy.db")]))
        .unwrap();
    assert_eq!(legacy.storage.db_path, "legacy.db");

    let both = MutantConfig::load_with_env(
        dir.path(),
        env_from(&[("SQLITE_FILE", "legacy.db"), ("MUTANT_DB_PATH", "new.db")]),
    )
    .unwrap();
    assert_eq!(both.storage.db_path, "new.db");
}

#[test]
fn non_numeric_timeout_env_is_invalid_value() {
    let dir = tempfile::tempdir().unwrap();
    let err = MutantConfig::load_with_env(
        dir.path(),
        env_from(&[("MUTANT_BUSY_TIMEOUT_MS", "soon")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let mut config = MutantConfig::default();
    config.storage.read_pool_size = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));

    let mut config = MutantConfig::default();
    config.storage.busy_timeout_ms = 0;
    assert!(config.validate().is_err());

    let mut config = MutantConfig::default();
    config.storage.db_path = "  ".to_string();
    assert!(config.validate().is_err());

    // An empty path is irrelevant to the hash-map backend.
    config.storage = StorageConfig {
        db_path: String::new(),
        ..StorageConfig::in_memory()
    };
    assert!(config.validate().is_ok());
}
