//! Configuration loading and root folder resolution tests
//!
//! Uses serial_test to prevent environment variable races: tests touching
//! DAY_ROOT_FOLDER or API_BACKEND_SECRET are marked #[serial].

use day_common::config::{
    default_root_folder, resolve_root_folder, TomlConfig, BACKEND_SECRET_ENV, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let resolved = resolve_root_folder(None, &TomlConfig::default());
    assert!(!resolved.as_os_str().is_empty());
    assert_eq!(resolved, default_root_folder());
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/day-test-env-folder");

    let mut config = TomlConfig::default();
    config.root_folder = Some(PathBuf::from("/tmp/day-test-toml-folder"));

    let resolved = resolve_root_folder(None, &config);
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/tmp/day-test-env-folder"));
}

#[test]
#[serial]
fn test_toml_used_when_env_missing() {
    env::remove_var(ROOT_FOLDER_ENV);

    let mut config = TomlConfig::default();
    config.root_folder = Some(PathBuf::from("/tmp/day-test-toml-folder"));

    assert_eq!(
        resolve_root_folder(None, &config),
        PathBuf::from("/tmp/day-test-toml-folder")
    );
}

#[test]
#[serial]
fn test_cli_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/day-test-env-folder");
    let resolved = resolve_root_folder(Some(Path::new("/tmp/day-cli")), &TomlConfig::default());
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/tmp/day-cli"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = 9001\napi_backend_secret = \"from-file\"").unwrap();

    let config = TomlConfig::load(file.path()).unwrap();
    assert_eq!(config.port, 9001);
    assert_eq!(config.api_backend_secret.as_deref(), Some("from-file"));
}

#[test]
fn test_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = TomlConfig::load_optional(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = [this is not toml").unwrap();

    assert!(TomlConfig::load_optional(file.path()).is_err());
}

#[test]
#[serial]
fn test_backend_secret_env_overrides_toml() {
    let mut config = TomlConfig::default();
    config.api_backend_secret = Some("from-toml".to_string());

    env::remove_var(BACKEND_SECRET_ENV);
    assert_eq!(config.backend_secret().as_deref(), Some("from-toml"));

    env::set_var(BACKEND_SECRET_ENV, "from-env");
    let secret = config.backend_secret();
    env::remove_var(BACKEND_SECRET_ENV);
    assert_eq!(secret.as_deref(), Some("from-env"));
}

#[test]
#[serial]
fn test_empty_backend_secret_is_unset() {
    env::remove_var(BACKEND_SECRET_ENV);
    let mut config = TomlConfig::default();
    config.api_backend_secret = Some(String::new());
    assert!(config.backend_secret().is_none());
}

#[test]
#[serial]
fn test_empty_env_secret_falls_back_to_toml() {
    let mut config = TomlConfig::default();
    config.api_backend_secret = Some("s3cret".to_string());

    env::set_var(BACKEND_SECRET_ENV, "");
    let secret = config.backend_secret();
    env::remove_var(BACKEND_SECRET_ENV);
    assert_eq!(secret.as_deref(), Some("s3cret"));
}
