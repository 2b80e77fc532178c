//! Configuration settings for fittrack.
//!
//! Settings are loaded from `~/.fittrack/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FitError;
use crate::stats::{WeekStart, MAX_SERIES_DAYS};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Durable storage settings.
    pub storage: StorageConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log filter used when `FITTRACK_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Which key-value backend holds the workouts and session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data/`.
    #[default]
    File,
    /// A `kv` table in `fittrack.db`.
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

/// Durable storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Write example workouts when nothing has been persisted yet.
    #[serde(default = "default_true")]
    pub seed_on_first_run: bool,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// First day of the calendar week.
    #[serde(default)]
    pub week_start: WeekStart,
    /// Number of days in the dashboard calorie series.
    #[serde(default = "default_series_days")]
    pub series_days: u32,
    /// Number of workouts in the dashboard "recent" list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_series_days() -> u32 {
    7
}

const fn default_recent_limit() -> usize {
    3
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            seed_on_first_run: default_true(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            series_days: default_series_days(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, FitError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FitError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FitError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FitError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FitError> {
        if self.stats.series_days == 0 {
            return Err(FitError::Config(
                "stats.series_days must be at least 1".to_string(),
            ));
        }
        if self.stats.series_days > MAX_SERIES_DAYS {
            return Err(FitError::Config(format!(
                "stats.series_days must be at most {MAX_SERIES_DAYS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.seed_on_first_run);
        assert_eq!(config.stats.week_start, WeekStart::Monday);
        assert_eq!(config.stats.series_days, 7);
        assert_eq!(config.stats.recent_limit, 3);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.stats.week_start = WeekStart::Sunday;
        std::fs::write(&config_path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.storage.backend, StorageBackend::Sqlite);
        assert_eq!(loaded.stats.week_start, WeekStart::Sunday);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
stats:
  week_start: sunday
storage:
  seed_on_first_run: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.stats.week_start, WeekStart::Sunday);
        assert!(!config.storage.seed_on_first_run);
        // Defaults should be used for missing fields
        assert_eq!(config.stats.series_days, 7);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_zero_series_days_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "stats:\n  series_days: 0\n").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(result, Err(FitError::Config(_))));
    }

    #[test]
    fn test_huge_series_days_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "stats:\n  series_days: 200000000\n").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(result, Err(FitError::Config(_))));
    }
}
