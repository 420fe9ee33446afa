//! Configuration models for .fittrack/config.json.
//!
//! This module contains Serde models for the fittrack configuration. A missing
//! file means "all defaults"; unknown sections are rejected by the dot-path
//! accessors used by `fittrack config`.

pub mod field;
pub mod metadata;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::metrics::{age_today, validate_birthdate, AgeError, Sex};

/// Default config directory path.
pub const FITTRACK_DIR: &str = ".fittrack";
/// Default config file path.
pub const CONFIG_FILE: &str = ".fittrack/config.json";
/// Default data directory for persisted stores.
pub const DATA_DIR: &str = ".fittrack/data";

/// Where persisted stores live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per store.
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

fn default_data_dir() -> String {
    DATA_DIR.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Settings for the recently watched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyConfig {
    /// Seconds a video must stay on screen before it counts as watched.
    #[serde(default = "default_dwell_secs")]
    pub dwell_secs: u64,
    /// How many recent videos to show by default.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_dwell_secs() -> u64 {
    3
}

fn default_display_limit() -> usize {
    10
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            dwell_secs: default_dwell_secs(),
            display_limit: default_display_limit(),
        }
    }
}

impl RecencyConfig {
    /// Dwell time as a `Duration`.
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }
}

/// Default inputs for metric formulas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Formula branch used when `--sex` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Birthdate (DD/MM/YYYY) used to derive age when `--age` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

impl ProfileConfig {
    /// Age derived from the stored birthdate, if one is set.
    pub fn age(&self) -> Option<Result<u32, AgeError>> {
        self.birthdate
            .as_deref()
            .map(|b| validate_birthdate(b).map(age_today))
    }
}

/// Main configuration for fittrack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Recently watched settings.
    #[serde(default)]
    pub recency: RecencyConfig,
    /// Profile defaults.
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl FitConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `.fittrack/config.json` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: FitConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Directory for persisted stores.
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.dir)
    }

    /// Get a config value by dot-notation path (e.g., "recency.dwell_secs").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "storage" => self.storage.get_field(key),
            "recency" => self.recency.get_field(key),
            "profile" => self.profile.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "storage" => self.storage.set_field(key, value),
            "recency" => self.recency.set_field(key, value),
            "profile" => self.profile.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["storage", "recency", "profile"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "storage" => Some(StorageConfig::field_names()),
            "recency" => Some(RecencyConfig::field_names()),
            "profile" => Some(ProfileConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        Self::section_names()
            .iter()
            .filter_map(|section| {
                Self::fields_for_section(section)
                    .map(|fields| fields.iter().map(move |f| format!("{section}.{f}")))
            })
            .flatten()
            .collect()
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "storage" => self.storage = StorageConfig::default(),
            "recency" => self.recency = RecencyConfig::default(),
            "profile" => self.profile = ProfileConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.storage.dir, ".fittrack/data");
        assert_eq!(config.recency.dwell_secs, 3);
        assert_eq!(config.recency.dwell(), Duration::from_secs(3));
        assert_eq!(config.recency.display_limit, 10);
        assert!(config.profile.sex.is_none());
        assert!(config.profile.age().is_none());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = FitConfig::load(Some(&temp.path().join("nope.json"))).unwrap();
        assert_eq!(config, FitConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.json");

        let mut config = FitConfig::default();
        config.recency.dwell_secs = 5;
        config.profile.sex = Some(Sex::Female);
        config.profile.birthdate = Some("15/06/1994".into());
        config.save(Some(&path)).unwrap();

        let loaded = FitConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"recency": {"display_limit": 3}}"#).unwrap();

        let config = FitConfig::load(Some(&path)).unwrap();
        assert_eq!(config.recency.display_limit, 3);
        assert_eq!(config.recency.dwell_secs, 3);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            FitConfig::load(Some(&path)),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_profile_serialises_sex_lowercase() {
        let mut config = FitConfig::default();
        config.profile.sex = Some(Sex::Male);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["profile"]["sex"], "male");
        assert!(json["profile"].get("birthdate").is_none());
    }

    #[test]
    fn test_profile_age_from_birthdate() {
        let profile = ProfileConfig {
            sex: None,
            birthdate: Some("01/01/1990".into()),
        };
        assert!(profile.age().unwrap().unwrap() >= 34);

        let bad = ProfileConfig {
            sex: None,
            birthdate: Some("1990-01-01".into()),
        };
        assert!(bad.age().unwrap().is_err());
    }

    #[test]
    fn test_get_set_by_path() {
        let mut config = FitConfig::default();
        config.set_by_path("recency.dwell_secs", "7").unwrap();
        assert_eq!(config.get_by_path("recency.dwell_secs").unwrap(), "7");

        config.set_by_path("profile.sex", "female").unwrap();
        assert_eq!(config.profile.sex, Some(Sex::Female));

        assert!(matches!(
            config.get_by_path("nope.key"),
            Err(FieldError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set_by_path("nodot", "1"),
            Err(FieldError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_all_keys() {
        let keys = FitConfig::all_keys();
        assert!(keys.contains(&"storage.dir".to_string()));
        assert!(keys.contains(&"recency.dwell_secs".to_string()));
        assert!(keys.contains(&"recency.display_limit".to_string()));
        assert!(keys.contains(&"profile.sex".to_string()));
        assert!(keys.contains(&"profile.birthdate".to_string()));
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_reset_section() {
        let mut config = FitConfig::default();
        config.recency.display_limit = 1;
        config.reset_section("recency").unwrap();
        assert_eq!(config.recency, RecencyConfig::default());
        assert!(config.reset_section("bogus").is_err());
    }
}
