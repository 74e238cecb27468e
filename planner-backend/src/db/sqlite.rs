//! SQLite-backed key-value store
//!
//! A single `kv_store` table holds one serialized collection per key.
//! Each write is an upsert, so a save replaces the previous value in one
//! statement.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;

use super::KeyValueStore;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file, creating parent directories as needed
    pub fn new(db_path: &str) -> SqliteResult<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> SqliteResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SqliteResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Read the value stored under `key`
    pub fn get_value(&self, key: &str) -> SqliteResult<Option<String>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
    }

    /// Write `value` under `key`, replacing any previous value
    pub fn set_value(&self, key: &str, value: &str) -> SqliteResult<()> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn delete_value(&self, key: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        self.get_value(key)
            .map_err(|e| format!("Failed to read '{}': {}", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.set_value(key, value)
            .map_err(|e| format!("Failed to write '{}': {}", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.delete_value(key)
            .map(|_| ())
            .map_err(|e| format!("Failed to delete '{}': {}", key, e))
    }
}
