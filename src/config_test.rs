// Tests for GlossaryConfig
// Environment tests mutate process-wide state and run serially.

use super::*;
use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    for name in [ENV_SOURCE, ENV_DB_PATH, ENV_BUNDLE_PATH, ENV_API_URL] {
        std::env::remove_var(name);
    }
}

#[test]
fn test_defaults() {
    let config = GlossaryConfig::default();
    assert_eq!(config.source, SourceKind::Remote);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    assert!(config.bundle_path.is_none());
}

#[test]
fn test_source_kind_from_str() {
    assert_eq!("sqlite".parse::<SourceKind>(), Ok(SourceKind::Sqlite));
    assert_eq!(" Bundled ".parse::<SourceKind>(), Ok(SourceKind::Bundled));
    assert!("ftp".parse::<SourceKind>().is_err());
    assert_eq!(SourceKind::Remote.to_string(), "remote");
}

#[test]
fn test_load_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("glossary.json");
    std::fs::write(&path, r#"{"source": "sqlite", "dbPath": "/tmp/terms.sqlite"}"#).unwrap();

    let config = GlossaryConfig::load(&path).unwrap();
    assert_eq!(config.source, SourceKind::Sqlite);
    assert_eq!(config.resolved_db_path().unwrap(), PathBuf::from("/tmp/terms.sqlite"));
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = GlossaryConfig::load(&temp_dir.path().join("nope.json"));
    assert!(matches!(result, Err(ConfigError::Read(_))));
}

#[test]
fn test_load_invalid_source_fails_to_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("glossary.json");
    std::fs::write(&path, r#"{"source": "carrier-pigeon"}"#).unwrap();

    assert!(matches!(GlossaryConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_zero_timeout_disables_it() {
    let config = GlossaryConfig {
        request_timeout_secs: 0,
        ..GlossaryConfig::default()
    };
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_bundle_path_required() {
    let config = GlossaryConfig::default();
    assert!(matches!(config.resolved_bundle_path(), Err(ConfigError::Missing(_))));
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_env();
    std::env::set_var(ENV_SOURCE, "bundled");
    std::env::set_var(ENV_BUNDLE_PATH, "/data/glossary.json");
    std::env::set_var(ENV_API_URL, "http://localhost:8080/glossary");

    let config = GlossaryConfig::load_or_default(None).unwrap();
    clear_env();

    assert_eq!(config.source, SourceKind::Bundled);
    assert_eq!(config.resolved_bundle_path().unwrap(), PathBuf::from("/data/glossary.json"));
    assert_eq!(config.api_url, "http://localhost:8080/glossary");
}

#[test]
#[serial]
fn test_invalid_env_source_is_rejected() {
    clear_env();
    std::env::set_var(ENV_SOURCE, "floppy");

    let result = GlossaryConfig::default().with_env_overrides();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
}

#[test]
#[serial]
fn test_blank_env_values_ignored() {
    clear_env();
    std::env::set_var(ENV_DB_PATH, "  ");

    let config = GlossaryConfig::default().with_env_overrides().unwrap();
    clear_env();

    assert!(config.db_path.is_none());
}
