//! Gate behaviour end to end over a file-backed store.

use docgate::clock::ManualClock;
use docgate::session::{
    digest_hex, GuardSettings, SessionGuard, SessionRecord, SessionStatus, DEFAULT_SESSION_KEY,
    DEFAULT_SESSION_TTL_MS,
};
use docgate::storage::{FileStore, LocalStore, MemoryStore};
use docgate::theme::{self, Theme, DEFAULT_THEME_KEY};
use tempfile::tempdir;

const PASSWORD: &str = "site-password";
const NOW: i64 = 1_760_000_000_000;

fn settings() -> GuardSettings {
    GuardSettings::new(digest_hex(PASSWORD))
}

#[test]
fn test_login_persists_across_page_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let clock = ManualClock::new(NOW);

    {
        let store = FileStore::open(&path).unwrap();
        let mut guard = SessionGuard::with_clock(store, settings(), &clock);
        assert!(!guard.is_authenticated());
        assert!(guard.authenticate(PASSWORD).unwrap());
    }

    clock.advance(60_000);
    let store = FileStore::open(&path).unwrap();
    let mut guard = SessionGuard::with_clock(store, settings(), &clock);
    assert!(guard.is_authenticated());
}

#[test]
fn test_stored_record_is_plain_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let clock = ManualClock::new(NOW);

    let mut guard = SessionGuard::with_clock(FileStore::open(&path).unwrap(), settings(), &clock);
    guard.authenticate(PASSWORD).unwrap();

    let raw = guard.store().get(DEFAULT_SESSION_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["timestamp"], NOW);
    assert_eq!(value["digest"], digest_hex(PASSWORD));
}

#[test]
fn test_expired_session_removed_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let clock = ManualClock::new(NOW);

    let mut guard = SessionGuard::with_clock(FileStore::open(&path).unwrap(), settings(), &clock);
    guard.authenticate(PASSWORD).unwrap();
    clock.advance(DEFAULT_SESSION_TTL_MS + 1);
    assert_eq!(guard.inspect(), SessionStatus::Expired);
    drop(guard);

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(DEFAULT_SESSION_KEY).unwrap(), None);
}

#[test]
fn test_exactly_at_boundary_is_valid() {
    let mut store = MemoryStore::new();
    let record = SessionRecord::new(NOW - DEFAULT_SESSION_TTL_MS, digest_hex(PASSWORD));
    store
        .set(DEFAULT_SESSION_KEY, &record.to_json().unwrap())
        .unwrap();

    let clock = ManualClock::new(NOW);
    let mut guard = SessionGuard::with_clock(&mut store, settings(), &clock);
    assert!(guard.is_authenticated());
}

#[test]
fn test_invalid_records_removed_and_idempotent() {
    let stale = SessionRecord::new(NOW, digest_hex("previous password"))
        .to_json()
        .unwrap();
    let expired = SessionRecord::new(NOW - DEFAULT_SESSION_TTL_MS - 1, digest_hex(PASSWORD))
        .to_json()
        .unwrap();
    let cases = [
        ("corrupt", "{\"timestamp\":", SessionStatus::Corrupt),
        ("wrong type", "[]", SessionStatus::Corrupt),
        ("stale digest", stale.as_str(), SessionStatus::DigestMismatch),
        ("expired", expired.as_str(), SessionStatus::Expired),
    ];

    for (name, raw, expected) in cases {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_SESSION_KEY, raw).unwrap();
        let clock = ManualClock::new(NOW);
        let mut guard = SessionGuard::with_clock(&mut store, settings(), &clock);

        assert_eq!(guard.inspect(), expected, "case: {}", name);
        assert!(!guard.is_authenticated(), "case: {}", name);
        assert!(!guard.is_authenticated(), "case: {}", name);
        drop(guard);
        assert!(store.is_empty(), "case: {}", name);
    }
}

#[test]
fn test_relogin_replaces_record() {
    let clock = ManualClock::new(NOW);
    let mut guard = SessionGuard::with_clock(MemoryStore::new(), settings(), &clock);

    guard.authenticate(PASSWORD).unwrap();
    clock.advance(DEFAULT_SESSION_TTL_MS - 10);
    guard.authenticate(PASSWORD).unwrap();
    clock.advance(100);

    assert!(guard.is_authenticated());
    let raw = guard.store().get(DEFAULT_SESSION_KEY).unwrap().unwrap();
    assert_eq!(
        SessionRecord::from_json(&raw).unwrap().timestamp,
        NOW + DEFAULT_SESSION_TTL_MS - 10
    );
}

#[test]
fn test_theme_survives_logout() {
    let mut store = MemoryStore::new();
    theme::save(&mut store, DEFAULT_THEME_KEY, Theme::Light).unwrap();

    let clock = ManualClock::new(NOW);
    let mut guard = SessionGuard::with_clock(&mut store, settings(), &clock);
    guard.authenticate(PASSWORD).unwrap();
    guard.logout().unwrap();
    assert!(!guard.is_authenticated());
    drop(guard);

    assert_eq!(theme::load(&store, DEFAULT_THEME_KEY), Theme::Light);
}
