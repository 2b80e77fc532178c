//! Database migrations for the SQLite backend.
//!
//! Each migration upgrades the schema by one version. Migrations are run
//! automatically when the database is opened.

use rusqlite::Connection;

use crate::error::FitError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, FitError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FitError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), FitError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FitError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FitError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running storage migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), FitError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(FitError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the key-value table.
fn migrate_v1(conn: &Connection) -> Result<(), FitError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| FitError::Database(format!("Migration v1 failed: {e}")))
}
