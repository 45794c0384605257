//! TOML-based application configuration.
//!
//! Stores:
//! - Where the state snapshot lives (database file, snapshot key)
//! - Badge polling cadence
//! - First-run behavior
//!
//! Configuration is stored at `~/.config/studycat/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};

/// Snapshot storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// Key of the single snapshot row in the kv table.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

/// Badge evaluation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgesConfig {
    /// Seconds between night-owl checks.
    #[serde(default = "default_night_owl_poll_secs")]
    pub night_owl_poll_secs: u64,
}

/// Session start behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed default tasks and a week of study logs when the state is empty.
    #[serde(default = "default_true")]
    pub load_sample_data: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studycat/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub badges: BadgesConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_database_file() -> String {
    "studycat.db".into()
}
fn default_snapshot_key() -> String {
    "smartStudyState".into()
}
fn default_night_owl_poll_secs() -> u64 {
    3600
}
fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            snapshot_key: default_snapshot_key(),
        }
    }
}

impl Default for BadgesConfig {
    fn default() -> Self {
        Self {
            night_owl_poll_secs: default_night_owl_poll_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load_sample_data: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                        .into(),
                ),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".into()).into());
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown().into())
    }

    fn path_in(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    /// Load from `~/.config/studycat/config.toml`, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&data_dir()?)
    }

    /// Load from `config.toml` inside `dir`, writing defaults if it is missing.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(dir)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(error) => {
                tracing::warn!(%error, "falling back to default config");
                Self::default()
            }
        }
    }

    /// Persist to the default data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&data_dir()?)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let path = Self::path_in(dir);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(CoreError::from)?;
        Ok(())
    }

    pub fn night_owl_interval(&self) -> Duration {
        Duration::from_secs(self.badges.night_owl_poll_secs.max(1))
    }

    pub fn database_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.storage.database_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.storage.database_file, "studycat.db");
        assert_eq!(cfg.storage.snapshot_key, "smartStudyState");
        assert_eq!(cfg.badges.night_owl_poll_secs, 3600);
        assert!(cfg.session.load_sample_data);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[badges]\nnight_owl_poll_secs = 60\n").unwrap();
        assert_eq!(cfg.badges.night_owl_poll_secs, 60);
        assert_eq!(cfg.storage.snapshot_key, "smartStudyState");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("badges.night_owl_poll_secs").as_deref(), Some("3600"));
        assert_eq!(cfg.get("session.load_sample_data").as_deref(), Some("true"));
        assert_eq!(cfg.get("storage.database_file").as_deref(), Some("studycat.db"));
        assert!(cfg.get("storage.missing_key").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("session.load_sample_data", "false").unwrap();
        cfg.set("badges.night_owl_poll_secs", "120").unwrap();
        cfg.set("storage.snapshot_key", "alt").unwrap();
        assert!(!cfg.session.load_sample_data);
        assert_eq!(cfg.badges.night_owl_poll_secs, 120);
        assert_eq!(cfg.storage.snapshot_key, "alt");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("session.nope", "1").is_err());
        assert!(cfg.set("badges.night_owl_poll_secs", "soon").is_err());
        assert!(cfg.set("badges", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(dir.path().join("config.toml").exists());

        let mut changed = cfg.clone();
        changed.set("badges.night_owl_poll_secs", "5").unwrap();
        changed.save_to(dir.path()).unwrap();
        assert_eq!(Config::load_from(dir.path()).unwrap().badges.night_owl_poll_secs, 5);
    }
}
