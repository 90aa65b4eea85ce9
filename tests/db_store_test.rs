//! Tests for the record stores and versioned records.

use diesel::Connection;
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;
use tempfile::NamedTempFile;

use gridle::{
    MIGRATIONS, MemoryStore, RecordStore, SESSION_KEY, STATS_KEY, SqliteStore, Statistics, decode,
    encode,
};

/// Creates a temporary database file and a store over it. The file handle
/// must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_read_missing_key_is_none() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.read(SESSION_KEY).expect("Read failed"), None);
}

#[test]
fn test_write_then_read() {
    let (_db, store) = setup_test_db();
    store.write(STATS_KEY, "{\"version\":1}").expect("Write failed");
    assert_eq!(
        store.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("{\"version\":1}")
    );
}

#[test]
fn test_write_replaces_previous_value() {
    let (_db, store) = setup_test_db();
    store.write(STATS_KEY, "first").expect("Write failed");
    store.write(STATS_KEY, "second").expect("Write failed");
    assert_eq!(
        store.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("second")
    );
}

#[test]
fn test_keys_are_independent() {
    let (_db, store) = setup_test_db();
    store.write(SESSION_KEY, "session").expect("Write failed");
    store.write(STATS_KEY, "stats").expect("Write failed");
    store.clear(SESSION_KEY).expect("Clear failed");

    assert_eq!(store.read(SESSION_KEY).expect("Read failed"), None);
    assert_eq!(
        store.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("stats")
    );
}

#[test]
fn test_clear_missing_key_is_ok() {
    let (_db, store) = setup_test_db();
    store.clear(SESSION_KEY).expect("Clear of missing key failed");
}

#[test]
fn test_data_survives_reopen() {
    let (db, store) = setup_test_db();
    store.write(STATS_KEY, "kept").expect("Write failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteStore::open(path).expect("Reopen failed");
    assert_eq!(
        reopened.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("kept")
    );
}

#[test]
fn test_open_applies_migrations_once() {
    let (db, _store) = setup_test_db();
    let path = db.path().to_str().expect("Invalid path");

    let mut conn = SqliteConnection::establish(path).expect("Failed to connect");
    assert!(
        !conn
            .has_pending_migration(MIGRATIONS)
            .expect("Migration check failed"),
        "Open should apply every migration"
    );
}

#[test]
fn test_memory_store_clones_share_state() {
    let store = MemoryStore::new();
    let clone = store.clone();
    clone.write(SESSION_KEY, "shared").expect("Write failed");
    assert_eq!(
        store.read(SESSION_KEY).expect("Read failed").as_deref(),
        Some("shared")
    );
    store.clear(SESSION_KEY).expect("Clear failed");
    assert_eq!(clone.read(SESSION_KEY).expect("Read failed"), None);
}

#[test]
fn test_envelope_carries_version() {
    let payload = encode(&Statistics::new().record(true)).expect("Encode failed");
    let value: serde_json::Value = serde_json::from_str(&payload).expect("Invalid JSON");
    assert_eq!(value["version"], 1);
    assert_eq!(value["data"]["played"], 1);
    assert_eq!(value["data"]["maxStreak"], 1);
}

#[test]
fn test_decode_rejects_other_versions() {
    let payload = r#"{"version":2,"data":{"played":1,"won":1,"lost":0,"streak":1,"maxStreak":1}}"#;
    assert_eq!(decode::<Statistics>(payload), None);
}

#[test]
fn test_decode_rejects_unversioned_records() {
    let payload = r#"{"played":1,"won":1,"lost":0,"streak":1,"maxStreak":1}"#;
    assert_eq!(decode::<Statistics>(payload), None);
}

#[test]
fn test_decode_rejects_garbage() {
    assert_eq!(decode::<Statistics>("not json"), None);
}

#[test]
fn test_write_all_stores_every_record() {
    let (_db, store) = setup_test_db();
    store.write(SESSION_KEY, "old").expect("Write failed");
    store
        .write_all(&[(SESSION_KEY, "session"), (STATS_KEY, "stats")])
        .expect("Batch write failed");

    assert_eq!(
        store.read(SESSION_KEY).expect("Read failed").as_deref(),
        Some("session")
    );
    assert_eq!(
        store.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("stats")
    );
}

#[test]
fn test_memory_write_all_stores_every_record() {
    let store = MemoryStore::new();
    store
        .write_all(&[(SESSION_KEY, "session"), (STATS_KEY, "stats")])
        .expect("Batch write failed");
    assert_eq!(
        store.read(STATS_KEY).expect("Read failed").as_deref(),
        Some("stats")
    );
}
