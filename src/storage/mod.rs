//! Durable key-value storage for fittrack.
//!
//! Everything fittrack persists is a string value under a well-known key:
//! - `workouts` - JSON array of workout records
//! - `workouts.corrupt` - the last `workouts` value that was not a JSON array
//! - `user` - JSON object of the logged-in profile
//!
//! Backends are interchangeable behind [`KeyValueStore`]:
//! - [`MemoryStore`] keeps values for the life of the process
//! - [`FileStore`] writes one `<key>.json` file per key
//! - [`SqliteStore`] keeps a `kv` table in `fittrack.db`

mod database;
mod file;
mod kv;
mod migrations;

pub use database::SqliteStore;
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};

#[cfg(test)]
pub use kv::MockKeyValueStore;

use crate::config::{Paths, StorageBackend};
use crate::error::FitError;

/// Key holding the serialized workout list.
pub const WORKOUTS_KEY: &str = "workouts";

/// Key receiving an unparseable workouts value before it is replaced.
pub const WORKOUTS_BACKUP_KEY: &str = "workouts.corrupt";

/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Open the backend selected in the configuration.
///
/// # Errors
///
/// Returns an error if the data directory or database cannot be created.
pub fn open_backend(
    backend: StorageBackend,
    paths: &Paths,
) -> Result<Box<dyn KeyValueStore>, FitError> {
    tracing::debug!(?backend, root = %paths.root.display(), "opening storage backend");
    match backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::File => {
            paths.ensure_dirs()?;
            Ok(Box::new(FileStore::new(paths.data.clone())))
        }
        StorageBackend::Sqlite => {
            paths.ensure_dirs()?;
            Ok(Box::new(SqliteStore::open_at(&paths.database)?))
        }
    }
}
