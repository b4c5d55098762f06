//! Application configuration.
//!
//! Everything is optional: a missing file, section or field falls back to the
//! defaults. The file lives at `<config dir>/collect-and-run/config.yaml`:
//!
//! ```yaml
//! updater:
//!   host_version: "2022.3.1f1"
//!   simulating_offset_minutes: -20
//! follower:
//!   speed: 2.5
//! log:
//!   level: info
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{config_dir, data_dir, CONFIG_FILE_NAME};
use crate::error::ConfigError;
use crate::follower::FollowerConfig;
use crate::updater::UpdateCheckConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub updater: UpdateCheckConfig,
    pub follower: FollowerConfig,
    pub log: LogConfig,
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Directory for the log file. Defaults to `<data dir>/collect-and-run/log`.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|e| ConfigError::InvalidValue("log.level".to_string(), e.to_string()))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| data_dir().join("log"))
    }
}

impl AppConfig {
    /// `<config dir>/collect-and-run/config.yaml`
    pub fn default_path() -> PathBuf {
        config_dir().join(CONFIG_FILE_NAME)
    }

    /// Reads and parses the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.updater.validate()?;
        self.log.level_filter()?;
        Ok(())
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "updater:\n  host_version: \"2022.3.1f1\"\n  simulating_offset_minutes: -5\nfollower:\n  speed: 4.0\n",
        )
        .unwrap();

        assert_eq!(config.updater.host_version, "2022.3.1f1");
        assert_eq!(config.updater.simulating_offset_minutes, -5);
        assert_eq!(config.updater.idle_offset_minutes, 20);
        assert_eq!(config.follower.speed, 4.0);
        assert_eq!(config.follower.next_waypoint_distance, 3.0);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "log:\n  level: warn\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "follower:\n  speed: fast\n").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(..))));
    }

    #[test]
    fn test_unusable_interval_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "updater:\n  check_interval_days: 1.0e9\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::InvalidValue(field, _)) if field == "updater.check_interval_days"
        ));
    }

    #[test]
    fn test_bad_log_level() {
        let config = LogConfig {
            level: "loud".to_string(),
            dir: None,
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidValue(..))
        ));
    }
}
