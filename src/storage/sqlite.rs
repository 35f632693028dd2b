//! SQLite-backed key-value storage with file blob support
//!
//! Small values live inline in SQLite, large ones (>10KB) as files named by
//! the SHA-256 of their key.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, Result};
use crate::error::StorageError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Values larger than this are stored as external blobs
const INLINE_THRESHOLD: usize = 10 * 1024; // 10KB

/// SQLite-backed key-value store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    blobs_dir: PathBuf,
}

impl SqliteStore {
    /// Default storage directory (~/.local/share/cricsphere on Linux)
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::data_local_dir().ok_or(StorageError::NoHome)?;
        Ok(base.join("cricsphere"))
    }

    /// Resolve an optional override to a concrete storage directory
    pub fn resolve_dir(dir: Option<&str>) -> Result<PathBuf> {
        match dir {
            Some(d) => Ok(PathBuf::from(d)),
            None => Self::default_dir(),
        }
    }

    /// Open storage in a specific directory
    pub fn open_at(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| StorageError::Io(format!("Failed to create data dir: {}", e)))?;

        let db_path = data_dir.join("storage.db");
        let blobs_dir = data_dir.join("blobs");
        std::fs::create_dir_all(&blobs_dir)
            .map_err(|e| StorageError::Io(format!("Failed to create blobs dir: {}", e)))?;

        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Storage schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path, &blobs_dir)?;
            return Self::open_at(data_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT,
                blob_path TEXT,
                updated_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn: Mutex::new(conn),
            blobs_dir,
        })
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Write a blob file, sharded by first 2 chars of the hashed key
    fn write_blob(&self, key: &str, data: &str) -> Result<String> {
        let hashed = format!("{:x}", Sha256::digest(key.as_bytes()));
        let shard = &hashed[..2];
        let shard_dir = self.blobs_dir.join(shard);
        std::fs::create_dir_all(&shard_dir)
            .map_err(|e| StorageError::Io(format!("Failed to create shard dir: {}", e)))?;

        let filename = format!("{}.json", hashed);
        let rel_path = format!("{}/{}", shard, filename);

        std::fs::write(shard_dir.join(&filename), data)
            .map_err(|e| StorageError::Io(format!("Failed to write blob: {}", e)))?;

        Ok(rel_path)
    }

    fn remove_blob(&self, rel_path: &str) {
        let full_path = self.blobs_dir.join(rel_path);
        if let Err(e) = std::fs::remove_file(&full_path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!("Failed to remove blob {}: {}", rel_path, e);
        }
    }

    /// Nuke the store (delete DB and all blobs)
    fn nuke(db_path: &Path, blobs_dir: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| StorageError::Io(format!("Failed to remove storage DB: {}", e)))?;
        }
        if blobs_dir.exists() {
            std::fs::remove_dir_all(blobs_dir)
                .map_err(|e| StorageError::Io(format!("Failed to remove blobs dir: {}", e)))?;
        }
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;

        let row: Option<(Option<String>, Option<String>)> = conn
            .query_row(
                "SELECT value, blob_path FROM kv_entries WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((Some(value), None)) => Ok(Some(value)),
            Some((None, Some(blob_path))) => {
                match std::fs::read_to_string(self.blobs_dir.join(&blob_path)) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        log::warn!("Failed to read blob {}: {}", blob_path, e);
                        let _ = conn.execute("DELETE FROM kv_entries WHERE key = ?1", [key]);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().timestamp_millis();

        if value.len() <= INLINE_THRESHOLD {
            let conn = self.connection()?;
            let previous: Option<Option<String>> = conn
                .query_row(
                    "SELECT blob_path FROM kv_entries WHERE key = ?1",
                    [key],
                    |r| r.get(0),
                )
                .optional()?;

            conn.execute(
                "INSERT OR REPLACE INTO kv_entries (key, value, blob_path, updated_at, size_bytes)
                 VALUES (?1, ?2, NULL, ?3, ?4)",
                params![key, value, now, value.len()],
            )?;
            drop(conn);

            if let Some(Some(old_blob)) = previous {
                self.remove_blob(&old_blob);
            }
        } else {
            let blob_path = self.write_blob(key, value)?;
            let conn = self.connection()?;
            conn.execute(
                "INSERT OR REPLACE INTO kv_entries (key, value, blob_path, updated_at, size_bytes)
                 VALUES (?1, NULL, ?2, ?3, ?4)",
                params![key, blob_path, now, value.len()],
            )?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let conn = self.connection()?;
        let blob: Option<Option<String>> = conn
            .query_row(
                "SELECT blob_path FROM kv_entries WHERE key = ?1",
                [key],
                |r| r.get(0),
            )
            .optional()?;

        let deleted = conn.execute("DELETE FROM kv_entries WHERE key = ?1", [key])?;
        drop(conn);

        if let Some(Some(blob_path)) = blob {
            self.remove_blob(&blob_path);
        }

        Ok(deleted > 0)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_entries ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
