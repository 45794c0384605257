//! SQLite-backed snapshot storage.
//!
//! The whole `AppState` is stored as one JSON document under a single opaque
//! key. There is no schema versioning: a snapshot that no longer decodes is
//! treated as a load failure and the store starts from the default state.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::snapshot::SnapshotStore;
use super::{data_dir, Config};
use crate::error::{Result, StorageError};
use crate::model::AppState;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS snapshots (
    key      TEXT PRIMARY KEY,
    json     TEXT NOT NULL,
    saved_at TEXT NOT NULL
);";

pub struct Database {
    conn: Connection,
    snapshot_key: String,
}

impl Database {
    /// Open the database named in `config` inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the table created.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.database_path(&data_dir()?);
        Self::open_at(&path, &config.storage.snapshot_key)
    }

    pub fn open_at(path: &Path, snapshot_key: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn, snapshot_key)
    }

    /// In-memory database, gone when dropped.
    pub fn open_memory(snapshot_key: &str) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, snapshot_key)
    }

    fn with_connection(conn: Connection, snapshot_key: &str) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(snapshot_key, "snapshot database ready");
        Ok(Self {
            conn,
            snapshot_key: snapshot_key.to_string(),
        })
    }

    /// Raw JSON stored under `key`.
    pub fn raw_snapshot(&self, key: &str) -> Result<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT json FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    pub fn write_raw_snapshot(&self, key: &str, json: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, json, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET json = excluded.json, saved_at = excluded.saved_at",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove the stored snapshot so the next open starts fresh.
    pub fn clear_snapshot(&self) -> Result<()> {
        self.conn.execute(
            "DELETE FROM snapshots WHERE key = ?1",
            params![self.snapshot_key],
        )?;
        Ok(())
    }
}

impl SnapshotStore for Database {
    fn load(&self) -> Result<Option<AppState>> {
        match self.raw_snapshot(&self.snapshot_key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.write_raw_snapshot(&self.snapshot_key, &json)
    }
}
