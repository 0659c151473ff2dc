//! Key/value blob storage backends

use std::cell::RefCell;
use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::Result;

/// Trait for whole-value key/value storage.
///
/// Each key holds one text blob that is always read and written in full.
pub trait BlobStore {
    /// Read the value stored under `key`, `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// `SQLite` implementation of `BlobStore` backed by the `kv_store` table
pub struct SqliteBlobStore {
    db: Database,
}

impl SqliteBlobStore {
    /// Wrap an already opened (and migrated) database
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open a blob store in the database file at `path`
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Open a blob store in a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Access the underlying database
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.db.connection().execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

/// In-process `BlobStore`, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing value, e.g. a fixture blob
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_read_missing_key() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.read("NOTES_KEY").unwrap(), None);
    }

    #[test]
    fn test_sqlite_write_then_overwrite() {
        let store = SqliteBlobStore::open_in_memory().unwrap();

        store.write("NOTES_KEY", "[]").unwrap();
        store.write("NOTES_KEY", r#"[{"id":"1"}]"#).unwrap();

        assert_eq!(
            store.read("NOTES_KEY").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[test]
    fn test_sqlite_keys_are_independent() {
        let store = SqliteBlobStore::open_in_memory().unwrap();

        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();

        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_sqlite_value_survives_reopen() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("notes.db");

        {
            let store = SqliteBlobStore::open(&db_path).unwrap();
            store.write("NOTES_KEY", "[]").unwrap();
        }

        let reopened = SqliteBlobStore::open(&db_path).unwrap();
        assert_eq!(reopened.read("NOTES_KEY").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryBlobStore::with_entry("k", "v1");
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v1"));

        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.read("other").unwrap(), None);
    }
}
