//! Layered configuration: defaults, TOML file, environment.

use docgate::config::{Config, DEFAULT_REFERENCE_DIGEST};
use docgate::session::digest_hex;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all DOCGATE_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DOCGATE_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_missing_file_gives_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.reference_digest, DEFAULT_REFERENCE_DIGEST);
}

#[test]
fn test_toml_overrides_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "reference_digest = \"{}\"\nsession_ttl_ms = 3600000\nmin_query_len = 3\nindex_path = \"site/pages.toml\"\n",
            digest_hex("team")
        ),
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.reference_digest, digest_hex("team"));
    assert_eq!(config.session_ttl_ms, 3_600_000);
    assert_eq!(config.min_query_len, 3);
    assert_eq!(
        config.index_path.as_deref(),
        Some(std::path::Path::new("site/pages.toml"))
    );
    assert_eq!(config.debounce_ms, 200);
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "debounce_ms = 100\n").unwrap();

    std::env::set_var("DOCGATE_DEBOUNCE_MS", "350");
    let result = Config::load(Some(path.as_path()));
    clear_env();

    assert_eq!(result.unwrap().debounce_ms, 350);
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "reference_digest = \"hunter2\"\n").unwrap();

    let err = Config::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("reference_digest"));
}

#[test]
fn test_wrong_type_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "session_ttl_ms = \"a day\"\n").unwrap();

    assert!(Config::load(Some(path.as_path())).is_err());
}

#[test]
fn test_unknown_keys_do_not_fail_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme_kee = \"x\"\nmin_query_len = 2\n").unwrap();

    assert!(Config::load(Some(path.as_path())).is_ok());
}
