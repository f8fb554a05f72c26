//! Record store adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value capability the user service persists through.
//! - Keep backend details (SQL, encoding of raw items) behind the trait.
//!
//! # Invariants
//! - Items are JSON object maps; the store never interprets their fields.
//! - `get_item` reports a missing key as `Ok(None)`, not as an error.
//! - `put_item` fully replaces any existing item under the same key.
//! - `delete_item` succeeds when the key is absent.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_store;

pub use sqlite_store::SqliteRecordStore;

/// Raw persisted record: attribute name to JSON value.
pub type Item = serde_json::Map<String, serde_json::Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure reported by a record store.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidTableName(String),
    CorruptItem {
        key: String,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidTableName(name) => write!(f, "invalid table name: `{name}`"),
            Self::CorruptItem { key, source } => {
                write!(f, "stored item under key `{key}` is not a json object: {source}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize item: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::CorruptItem { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::InvalidTableName(_) | Self::UninitializedConnection { .. } => None,
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

/// Key-value capability over named collections of raw items.
pub trait RecordStore {
    fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>>;
    fn scan(&self, table: &str) -> StoreResult<Vec<Item>>;
    fn put_item(&self, table: &str, key: &str, item: &Item) -> StoreResult<()>;
    fn delete_item(&self, table: &str, key: &str) -> StoreResult<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        (**self).get_item(table, key)
    }

    fn scan(&self, table: &str) -> StoreResult<Vec<Item>> {
        (**self).scan(table)
    }

    fn put_item(&self, table: &str, key: &str, item: &Item) -> StoreResult<()> {
        (**self).put_item(table, key, item)
    }

    fn delete_item(&self, table: &str, key: &str) -> StoreResult<()> {
        (**self).delete_item(table, key)
    }
}
