//! SQLite key-value storage.
//!
//! Values live in a single `kv` table of `fittrack.db`. The schema is
//! versioned with `PRAGMA user_version`; see [`super::migrations`].

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::FitError;

use super::migrations;
use super::KeyValueStore;

/// Key-value storage backed by SQLite.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, FitError> {
        let conn = Connection::open(path).map_err(|e| {
            FitError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let store = Self { conn };
        migrations::run(&store.conn)?;
        Ok(store)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FitError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FitError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let store = Self { conn };
        migrations::run(&store.conn)?;
        Ok(store)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FitError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, FitError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| FitError::Persistence(format!("Failed to read '{key}': {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError> {
        self.conn
            .execute(
                r"INSERT INTO kv (key, value) VALUES (?1, ?2)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|e| FitError::Persistence(format!("Failed to write '{key}': {e}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), FitError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map(|_| ())
            .map_err(|e| FitError::Persistence(format!("Failed to remove '{key}': {e}")))
    }
}
