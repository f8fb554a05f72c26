#![allow(dead_code)]

use rusqlite::Connection;
use std::cell::Cell;
use userstore_core::db::{open_db_in_memory, DbError};
use userstore_core::{Item, RecordStore, StoreError, StoreResult};

pub const TABLE: &str = "users";

pub fn memory_db() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn injected_failure() -> StoreError {
    StoreError::Db(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
}

/// Wraps a store, counts calls and fails the operations it is told to.
pub struct ScriptedStore<S> {
    pub inner: S,
    pub fail_get: bool,
    pub fail_scan: bool,
    pub fail_put: bool,
    pub fail_delete: bool,
    pub gets: Cell<usize>,
    pub puts: Cell<usize>,
    pub deletes: Cell<usize>,
}

impl<S: RecordStore> ScriptedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_get: false,
            fail_scan: false,
            fail_put: false,
            fail_delete: false,
            gets: Cell::new(0),
            puts: Cell::new(0),
            deletes: Cell::new(0),
        }
    }
}

impl<S: RecordStore> RecordStore for ScriptedStore<S> {
    fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        self.gets.set(self.gets.get() + 1);
        if self.fail_get {
            return Err(injected_failure());
        }
        self.inner.get_item(table, key)
    }

    fn scan(&self, table: &str) -> StoreResult<Vec<Item>> {
        if self.fail_scan {
            return Err(injected_failure());
        }
        self.inner.scan(table)
    }

    fn put_item(&self, table: &str, key: &str, item: &Item) -> StoreResult<()> {
        self.puts.set(self.puts.get() + 1);
        if self.fail_put {
            return Err(injected_failure());
        }
        self.inner.put_item(table, key, item)
    }

    fn delete_item(&self, table: &str, key: &str) -> StoreResult<()> {
        self.deletes.set(self.deletes.get() + 1);
        if self.fail_delete {
            return Err(injected_failure());
        }
        self.inner.delete_item(table, key)
    }
}
