//! JSON file storage.
//!
//! Each key is stored as `<key>.json` inside the data directory. Writes go to
//! a temporary sibling file first and are renamed into place.

use std::path::PathBuf;

use crate::error::FitError;

use super::KeyValueStore;

/// Key-value storage backed by one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create file storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::sanitize_key(key)))
    }

    /// Sanitize a key for use as a filename.
    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn persistence_error(action: &str, path: &std::path::Path, err: &std::io::Error) -> FitError {
        FitError::Persistence(format!("Failed to {action} {}: {err}", path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, FitError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Self::persistence_error("read", &path, &e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Self::persistence_error("create", &self.dir, &e))?;

        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| Self::persistence_error("write", &tmp, &e))?;
        std::fs::rename(&tmp, &path).map_err(|e| Self::persistence_error("replace", &path, &e))
    }

    fn remove(&mut self, key: &str) -> Result<(), FitError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::persistence_error("remove", &path, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(FileStore::sanitize_key("workouts"), "workouts");
        assert_eq!(FileStore::sanitize_key("../user"), "___user");
        assert_eq!(FileStore::sanitize_key("a b"), "a_b");
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("workouts").unwrap(), None);
        store.set("workouts", "[1,2]").unwrap();

        assert_eq!(store.get("workouts").unwrap(), Some("[1,2]".to_string()));
        assert!(temp_dir.path().join("data/workouts.json").exists());
        assert!(!temp_dir.path().join("data/workouts.json.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::new(temp_dir.path().to_path_buf());
            store.set("user", "{}").unwrap();
        }
        let store = FileStore::new(temp_dir.path().to_path_buf());
        assert_eq!(store.get("user").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().to_path_buf());

        store.remove("user").unwrap();
        store.set("user", "{}").unwrap();
        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn test_unwritable_directory_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("data"));
        let result = store.set("workouts", "[]");
        assert!(matches!(result, Err(FitError::Persistence(_))));
    }
}
