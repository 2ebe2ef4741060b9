//! SQLite-backed key-value storage bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the client-state core.
//! - Apply schema migrations in deterministic order.
//! - Provide the key-value adapter all stores persist through.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Stores must not read/write state before migrations succeed.
//! - Undecodable persisted values surface as absence, never as errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod kv;
pub mod migrations;
mod open;

pub use open::{open_store, open_store_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Fatal storage failure. Corrupt values are not represented here; they are
/// recovered in [`kv::JsonStore::read`] by clearing the offending key.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Encode(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state value: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
