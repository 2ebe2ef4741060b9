//! Key-value persistence adapter.
//!
//! # Responsibility
//! - Provide the synchronous get/put/remove contract over string keys.
//! - Layer the JSON encode/decode boundary used by every store.
//!
//! # Invariants
//! - `JsonStore::read` never surfaces corrupt data as an error; it clears
//!   the offending key and reports absence.
//! - Storage failures themselves (I/O, schema) propagate as fatal errors.

use crate::storage::codec::decode_json;
use crate::storage::{StorageError, StorageResult};
use log::warn;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raw string-keyed, string-valued durable storage contract.
pub trait KeyValueStorage {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// SQLite-backed key-value storage over the `kv_entries` table.
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }

        Ok(None)
    }

    fn put_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// JSON persistence adapter shared by all state stores.
///
/// Values are full JSON serializations of in-memory state; there is no
/// partial or delta persistence at this boundary.
pub struct JsonStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> JsonStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads and decodes one key.
    ///
    /// A value that fails to decode is removed as a side effect and reported
    /// as absent, so callers can fall back to their defaults.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.storage.get_raw(key)? else {
            return Ok(None);
        };

        match decode_json(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("event=kv_read module=storage status=recovered key={key} error={err}");
                self.storage.remove(key)?;
                Ok(None)
            }
        }
    }

    /// Encodes and writes one key, replacing any previous value.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(StorageError::Encode)?;
        self.storage.put_raw(key, &raw)
    }

    /// Removes one key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage.remove(key)
    }
}
