//! File store behaviour shared by the gate and theme.

use docgate::storage::{FileStore, LocalStore, StoreError};
use docgate::theme::{self, Theme};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_store_file_is_json_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    theme::save(&mut store, "docgate.theme", Theme::Dark).unwrap();
    store.set("other", "value").unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["docgate.theme"], "dark");
    assert_eq!(value["other"], "value");
}

#[test]
fn test_toggle_persists_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    theme::save(&mut store, "t", Theme::Light).unwrap();
    assert_eq!(theme::toggle(&mut store, "t").unwrap(), Theme::Dark);

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(theme::load(&reopened, "t"), Theme::Dark);
}

#[test]
fn test_unknown_stored_theme_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, r#"{"t": "sepia"}"#).unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(Theme::ALL.contains(&theme::load(&store, "t")));
}

#[test]
fn test_corrupt_store_file_does_not_block_login() {
    use docgate::session::{digest_hex, GuardSettings, SessionGuard};

    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, r#"{"docgate.session": "{\"timest"#).unwrap();

    let store = FileStore::open(&path).unwrap();
    let mut guard = SessionGuard::new(store, GuardSettings::new(digest_hex("pw")));
    assert!(!guard.is_authenticated());
    assert!(guard.authenticate("pw").unwrap());

    let reopened = FileStore::open(&path).unwrap();
    let mut guard = SessionGuard::new(reopened, GuardSettings::new(digest_hex("pw")));
    assert!(guard.is_authenticated());
    assert!(dir.path().join("store.json.corrupt").exists());
}

#[test]
fn test_failed_login_write_leaves_gate_closed() {
    use docgate::session::{digest_hex, GateError, GuardSettings, SessionGuard};

    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path).unwrap();

    // The store path becomes a directory, so the record cannot be written.
    fs::create_dir(&path).unwrap();

    let mut guard = SessionGuard::new(store, GuardSettings::new(digest_hex("pw")));
    let err = guard.authenticate("pw").unwrap_err();
    assert!(matches!(err, GateError::Store(StoreError::Io { .. })));
    assert!(!guard.is_authenticated());
}

#[test]
fn test_failed_theme_write_keeps_previous_theme() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path).unwrap();
    theme::save(&mut store, "t", Theme::Light).unwrap();
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    assert!(theme::toggle(&mut store, "t").is_err());
    assert_eq!(theme::load(&store, "t"), Theme::Light);
}

#[cfg(unix)]
#[test]
fn test_write_failure_surfaces_from_guard() {
    use docgate::session::{digest_hex, GateError, GuardSettings, SessionGuard};

    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    // Parent "directory" is a regular file, so the write must fail.
    let store = FileStore::open(blocker.join("store.json")).unwrap();
    let mut guard = SessionGuard::new(store, GuardSettings::new(digest_hex("pw")));

    let err = guard.authenticate("pw").unwrap_err();
    assert!(matches!(err, GateError::Store(StoreError::Io { .. })));
    assert!(!guard.is_authenticated());
    assert!(!guard.authenticate("wrong").unwrap());
}
