use staffdesk_core::storage::migrations::latest_version;
use staffdesk_core::{
    open_store, open_store_in_memory, JsonStore, KeyValueStorage, SqliteKeyValueStorage,
    StorageError, UserProfile,
};

#[test]
fn migration_1_creates_kv_entries_table() {
    let conn = open_store_in_memory().unwrap();

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn put_get_remove_roundtrip() {
    let conn = open_store_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::new(&conn);

    assert_eq!(storage.get_raw("missing").unwrap(), None);

    storage.put_raw("greeting", "\"hello\"").unwrap();
    assert_eq!(
        storage.get_raw("greeting").unwrap().as_deref(),
        Some("\"hello\"")
    );

    storage.put_raw("greeting", "\"replaced\"").unwrap();
    assert_eq!(
        storage.get_raw("greeting").unwrap().as_deref(),
        Some("\"replaced\"")
    );

    storage.remove("greeting").unwrap();
    assert_eq!(storage.get_raw("greeting").unwrap(), None);

    // Removing an absent key stays a no-op.
    storage.remove("greeting").unwrap();
}

#[test]
fn json_store_roundtrips_typed_values() {
    let conn = open_store_in_memory().unwrap();
    let kv = JsonStore::new(SqliteKeyValueStorage::new(&conn));

    let profile = UserProfile::default_account();
    kv.write("profile", &profile).unwrap();

    let loaded: UserProfile = kv.read("profile").unwrap().unwrap();
    assert_eq!(loaded, profile);
}

#[test]
fn corrupt_value_is_cleared_and_read_as_absent() {
    let conn = open_store_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::new(&conn);
    storage.put_raw("profile", "{\"username\": not-json").unwrap();

    let kv = JsonStore::new(SqliteKeyValueStorage::new(&conn));
    let loaded: Option<UserProfile> = kv.read("profile").unwrap();
    assert_eq!(loaded, None);

    // The offending key was removed as a side effect.
    assert_eq!(storage.get_raw("profile").unwrap(), None);
}

#[test]
fn shape_mismatch_is_recovered_like_any_corruption() {
    let conn = open_store_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::new(&conn);
    storage.put_raw("profile", "[1, 2, 3]").unwrap();

    let kv = JsonStore::new(SqliteKeyValueStorage::new(&conn));
    let loaded: Option<UserProfile> = kv.read("profile").unwrap();
    assert_eq!(loaded, None);
    assert_eq!(storage.get_raw("profile").unwrap(), None);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("staffdesk.sqlite3");

    // First open creates the current schema.
    let conn = open_store(&db_path).unwrap();
    drop(conn);

    // Simulate a database written by a newer binary.
    let raw = rusqlite::Connection::open(&db_path).unwrap();
    raw.execute_batch("PRAGMA user_version = 99;").unwrap();
    drop(raw);

    let err = open_store(&db_path).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UnsupportedSchemaVersion { db_version: 99, .. }
    ));
}

#[test]
fn file_backed_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("staffdesk.sqlite3");

    {
        let conn = open_store(&db_path).unwrap();
        let kv = JsonStore::new(SqliteKeyValueStorage::new(&conn));
        kv.write("profile", &UserProfile::default_account()).unwrap();
    }

    let conn = open_store(&db_path).unwrap();
    let kv = JsonStore::new(SqliteKeyValueStorage::new(&conn));
    let loaded: UserProfile = kv.read("profile").unwrap().unwrap();
    assert_eq!(loaded, UserProfile::default_account());
}
