mod common;

use std::path::PathBuf;

use appnav::config::{AppConfig, ConfigError, ConfigStore};
use common::temp_config;

#[test]
fn test_config_default_values() {
    let config = AppConfig::default();
    assert_eq!(config.deep_link.scheme, "example");
    assert_eq!(config.deep_link.host, "app");
    assert!(config.storage.data_dir.is_none());
    assert!(config.features.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(AppConfig::config_path().ends_with("appnav/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = temp_config(
        r#"
[deep_link]
scheme = "myapp"
host = "open"

[storage]
data_dir = "/tmp/appnav-test"

[features]
welcome_banner = true
"#,
    );

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.deep_link.scheme, "myapp");
    assert_eq!(config.deep_link.host, "open");
    assert_eq!(
        config.storage.resolved_data_dir(),
        PathBuf::from("/tmp/appnav-test")
    );
    assert_eq!(config.features.get("welcome_banner"), Some(&true));
}

#[test]
fn test_partial_config_keeps_section_defaults() {
    let (_dir, path) = temp_config("[deep_link]\nscheme = \"other\"\n");
    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.deep_link.scheme, "other");
    assert_eq!(config.deep_link.host, "app");
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[deep_link\nscheme = ");
    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "got {:?}", err);
}

#[test]
fn test_validation_rejects_bad_scheme_and_host() {
    let mut config = AppConfig::default();
    config.deep_link.scheme = "1app".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    let mut config = AppConfig::default();
    config.deep_link.host = "a/b".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_store_reload_keeps_old_config_on_error() {
    let (_dir, path) = temp_config("[deep_link]\nhost = \"first\"\n");
    let store = ConfigStore::open(path.clone()).unwrap();
    assert_eq!(store.get().deep_link.host, "first");

    std::fs::write(&path, "[deep_link]\nhost = \"second\"\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().deep_link.host, "second");

    std::fs::write(&path, "[deep_link]\nhost = \"\"\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().deep_link.host, "second");
    assert_eq!(store.path(), path.as_path());
}
