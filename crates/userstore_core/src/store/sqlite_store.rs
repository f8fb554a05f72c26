//! SQLite-backed record store.
//!
//! # Invariants
//! - Requires a connection bootstrapped by `db::open_db*`.
//! - Every collection lives in the shared `records` table, keyed by
//!   `(table_name, item_key)`.
//! - Read paths reject stored text that is not a JSON object instead of
//!   masking it.

use crate::db::schema::{user_version, SCHEMA_VERSION};
use crate::store::{Item, RecordStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Record store over a single SQLite connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Wraps a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = user_version(conn)?;
        if actual_version != SCHEMA_VERSION {
            return Err(StoreError::UninitializedConnection {
                expected_version: SCHEMA_VERSION,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        let table = checked_table_name(table)?;
        let text = self
            .conn
            .query_row(
                "SELECT item FROM records WHERE table_name = ?1 AND item_key = ?2;",
                params![table, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        text.map(|value| parse_item(key, &value)).transpose()
    }

    fn scan(&self, table: &str) -> StoreResult<Vec<Item>> {
        let table = checked_table_name(table)?;
        let mut stmt = self.conn.prepare(
            "SELECT item_key, item
             FROM records
             WHERE table_name = ?1
             ORDER BY item_key ASC;",
        )?;
        let mut rows = stmt.query([table])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            let text: String = row.get(1)?;
            items.push(parse_item(&key, &text)?);
        }

        Ok(items)
    }

    fn put_item(&self, table: &str, key: &str, item: &Item) -> StoreResult<()> {
        let table = checked_table_name(table)?;
        let text = serde_json::to_string(item).map_err(StoreError::Serialize)?;
        self.conn.execute(
            "INSERT INTO records (table_name, item_key, item)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (table_name, item_key) DO UPDATE SET
                item = excluded.item,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![table, key, text],
        )?;
        Ok(())
    }

    fn delete_item(&self, table: &str, key: &str) -> StoreResult<()> {
        let table = checked_table_name(table)?;
        self.conn.execute(
            "DELETE FROM records WHERE table_name = ?1 AND item_key = ?2;",
            params![table, key],
        )?;
        Ok(())
    }
}

fn checked_table_name(table: &str) -> StoreResult<&str> {
    let trimmed = table.trim();
    if trimmed.is_empty() || trimmed.len() != table.len() {
        return Err(StoreError::InvalidTableName(table.to_string()));
    }
    Ok(table)
}

fn parse_item(key: &str, text: &str) -> StoreResult<Item> {
    serde_json::from_str::<Item>(text).map_err(|source| StoreError::CorruptItem {
        key: key.to_string(),
        source,
    })
}
