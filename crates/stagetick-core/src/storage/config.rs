//! TOML-based application configuration.
//!
//! Stores the default single-timer duration, the stage list for sequence
//! runs, tick cadences and notification preferences.
//!
//! Configuration is stored at `~/.config/stagetick/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Single-timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// One sequence stage as configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub label: String,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
    /// Toast shown when the stage finishes.
    #[serde(default)]
    pub message: Option<String>,
}

/// Sequence run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Use desktop notifications; falls back to the console when off.
    #[serde(default = "default_true")]
    pub desktop: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/stagetick/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_poll_interval_ms() -> u64 {
    200
}
fn default_frame_interval_ms() -> u64 {
    16
}
fn default_timeout_ms() -> u64 {
    2_500
}
fn default_true() -> bool {
    true
}
fn default_stages() -> Vec<StageConfig> {
    vec![
        StageConfig {
            label: "Heat".into(),
            minutes: 5,
            seconds: 0,
            message: Some("Heat finished.".into()),
        },
        StageConfig {
            label: "Cool".into(),
            minutes: 3,
            seconds: 0,
            message: Some("Cool finished.".into()),
        },
    ]
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            desktop: true,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    /// Load from the data directory; missing or unreadable files fall
    /// back to the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Look up a value by dotted key, e.g. `timer.minutes`.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        let value = root.pointer(&pointer)?;
        Some(match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a value by dotted key. The value is parsed as JSON first so
    /// numbers and booleans keep their type; anything else is a string.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut root = serde_json::to_value(&*self)?;
        let pointer = format!("/{}", key.replace('.', "/"));
        let slot = root
            .pointer_mut(&pointer)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        *slot = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        *self = serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_heat_then_cool() {
        let config = Config::default();
        assert_eq!(config.sequence.stages.len(), 2);
        assert_eq!(config.sequence.stages[0].label, "Heat");
        assert_eq!(config.sequence.stages[1].label, "Cool");
        assert_eq!(config.timer.poll_interval_ms, 200);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.timer.minutes = 12;
        config.notifications.desktop = false;
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.timer.minutes, 12);
        assert!(!loaded.notifications.desktop);
        assert_eq!(loaded.sequence.stages[0].minutes, 5);
    }

    #[test]
    fn get_and_set_by_dotted_key() {
        let mut config = Config::default();
        assert_eq!(config.get("timer.poll_interval_ms").as_deref(), Some("200"));

        config.set("timer.minutes", "7").expect("set");
        assert_eq!(config.timer.minutes, 7);

        config.set("notifications.enabled", "false").expect("set");
        assert!(!config.notifications.enabled);

        assert!(config.set("no.such.key", "1").is_err());
    }

    #[test]
    fn set_rejects_type_mismatches() {
        let mut config = Config::default();
        assert!(config.set("timer.minutes", "not-a-number").is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: Config = toml::from_str("[timer]\nminutes = 3\n").expect("parse");
        assert_eq!(parsed.timer.minutes, 3);
        assert_eq!(parsed.timer.poll_interval_ms, 200);
        assert_eq!(parsed.sequence.stages.len(), 2);
    }
}
