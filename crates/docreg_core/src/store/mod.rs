//! Durable local store and the two overlay stores built on it.
//!
//! # Responsibility
//! - Define the synchronous key-value contract (`KvStore`) that stands in
//!   for browser-local storage.
//! - Provide SQLite and in-memory implementations.
//! - Persist the override map and the added-document set as JSON text.
//!
//! # Invariants
//! - Every overlay mutation writes the full serialized map before returning.
//! - Reads never fail: missing or corrupt data loads as empty and is logged.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod added_store;
pub mod memory_kv;
pub mod override_store;
pub mod sqlite_kv;

pub use added_store::{AddedDocumentSet, AddedDocumentStore};
pub use memory_kv::MemoryKvStore;
pub use override_store::{OverrideMap, OverrideStore};
pub use sqlite_kv::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable store failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Write rejected because it would exceed the store capacity.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        limit_bytes: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize store value: {err}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                limit_bytes,
            } => write!(
                f,
                "store quota exceeded writing `{key}`: {required_bytes} bytes required, {limit_bytes} allowed"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Synchronous string key-value store.
///
/// Methods take `&self`; implementations own their interior mutability.
pub trait KvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
