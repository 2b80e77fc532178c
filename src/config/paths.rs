//! Path resolution for fittrack configuration and data files.
//!
//! All fittrack data is stored in `~/.fittrack/` unless `FITTRACK_HOME` is set:
//! - `config.yaml` - Main configuration file
//! - `data/` - JSON key-value store (`workouts.json`, `user.json`)
//! - `fittrack.db` - SQLite key-value store, used when `storage.backend` is `sqlite`

use std::path::PathBuf;

use crate::error::FitError;

/// Environment variable that overrides the root directory.
pub const HOME_ENV: &str = "FITTRACK_HOME";

/// Paths to fittrack configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.fittrack/`
    pub root: PathBuf,
    /// Config file: `~/.fittrack/config.yaml`
    pub config_file: PathBuf,
    /// JSON store directory: `~/.fittrack/data/`
    pub data: PathBuf,
    /// Database file: `~/.fittrack/fittrack.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `FITTRACK_HOME`, falling back to the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, FitError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            FitError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".fittrack")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            data: root.join("data"),
            database: root.join("fittrack.db"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FitError> {
        for dir in [&self.root, &self.data] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FitError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".fittrack"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-fittrack");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.data, root.join("data"));
        assert_eq!(paths.database, root.join("fittrack.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.data.exists());
    }
}
