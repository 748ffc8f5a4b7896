// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed key-value store.
//!
//! A single connection is owned by the store; the vault engine is single
//! writer, so no pooling or background thread is involved.

use std::path::Path;

use keyward_config::StorageConfig;
use keyward_core::{KeyValueStore, KeywardError};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::migrations;

/// Durable [`KeyValueStore`] persisted in a `kv_store` table.
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteStore {
    /// Open the database configured in `[storage]`.
    pub fn from_config(config: &StorageConfig) -> Result<Self, KeywardError> {
        Self::open(Path::new(&config.database_path), config.wal_mode)
    }

    /// Open (creating if needed) the database at `path` and run migrations.
    pub fn open(path: &Path, wal_mode: bool) -> Result<Self, KeywardError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(KeywardError::storage)?;
        }

        let conn = Connection::open(path).map_err(KeywardError::storage)?;
        if wal_mode {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(KeywardError::storage)?;
            debug!(journal_mode = %mode, "journal mode set");
        }
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(KeywardError::storage)?;

        let store = Self::with_connection(conn)?;
        info!(path = %path.display(), wal_mode, "sqlite store opened");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, KeywardError> {
        let conn = Connection::open_in_memory().map_err(KeywardError::storage)?;
        Self::with_connection(conn)
    }

    fn with_connection(mut conn: Connection) -> Result<Self, KeywardError> {
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize, KeywardError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .map_err(KeywardError::storage)?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, KeywardError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeywardError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(KeywardError::storage)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeywardError> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value],
            )
            .map_err(KeywardError::storage)?;
        debug!(bytes = value.len(), "store value written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn get_missing_key_returns_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("passwords_abc").unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn set_then_get() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("keyward.db");

        {
            let mut store = SqliteStore::open(&path, true).unwrap();
            store.set("passwords_ns", "[]").unwrap();
        }

        let store = SqliteStore::open(&path, true).unwrap();
        assert_eq!(store.get("passwords_ns").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn from_config_uses_database_path() {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("cfg.db").to_string_lossy().into_owned(),
            wal_mode: false,
        };
        let mut store = SqliteStore::from_config(&config).unwrap();
        store.set("theme", "light").unwrap();
        assert!(dir.path().join("cfg.db").exists());
    }

    #[test]
    fn unicode_values_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "パスワード \"quoted\" ✓").unwrap();
        assert_eq!(
            store.get("k").unwrap().as_deref(),
            Some("パスワード \"quoted\" ✓")
        );
    }
}
