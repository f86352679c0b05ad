//! SQLite implementation of the persistence surface.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use exam_core::{PersistenceSurface, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Durable key/value storage in a single SQLite file.
///
/// One database file corresponds to one storage origin.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Highest schema version recorded in the database.
    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// When `key` was last written.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::InvalidData(format!("updated_at for {}: {}", key, e)))
        })
        .transpose()
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl From<DbError> for StorageError {
    fn from(e: DbError) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

impl PersistenceSurface for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.read(key).map_err(Into::into)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.write(key, value).map_err(Into::into)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.delete(key).map_err(Into::into)
    }
}
