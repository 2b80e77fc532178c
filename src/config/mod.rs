//! Configuration management for fittrack.
//!
//! This module handles loading and saving configuration from `~/.fittrack/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StatsConfig, StorageBackend, StorageConfig};
