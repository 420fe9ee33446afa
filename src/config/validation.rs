//! ConfigField trait implementations for config sections.
//!
//! This module contains the `ConfigField` implementations for each config type,
//! providing dynamic get/set access with validation for the `fittrack config` CLI.

use super::field::{format_optional, is_unset, ConfigField, FieldError};
use super::{ProfileConfig, RecencyConfig, StorageConfig};
use crate::metrics::{validate_birthdate, Sex};

impl ConfigField for StorageConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "dir" => Some(self.dir.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "dir" => {
                if value.trim().is_empty() {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "non-empty directory path".into(),
                    });
                }
                self.dir = value.trim().to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["dir"]
    }
}

impl ConfigField for RecencyConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "dwell_secs" => Some(self.dwell_secs.to_string()),
            "display_limit" => Some(self.display_limit.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "dwell_secs" => {
                self.dwell_secs = value.trim().parse().map_err(|_| FieldError::InvalidValue {
                    key: key.into(),
                    expected: "non-negative integer".into(),
                })?;
                Ok(())
            }
            "display_limit" => {
                let limit: usize = value.trim().parse().map_err(|_| FieldError::InvalidValue {
                    key: key.into(),
                    expected: "positive integer".into(),
                })?;
                if limit == 0 {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "positive integer".into(),
                    });
                }
                self.display_limit = limit;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["dwell_secs", "display_limit"]
    }
}

impl ConfigField for ProfileConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "sex" => Some(format_optional(&self.sex)),
            "birthdate" => Some(format_optional(&self.birthdate)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "sex" => {
                self.sex = if is_unset(value) {
                    None
                } else {
                    Some(value.parse::<Sex>().map_err(|_| FieldError::InvalidValue {
                        key: key.into(),
                        expected: "male or female".into(),
                    })?)
                };
                Ok(())
            }
            "birthdate" => {
                self.birthdate = if is_unset(value) {
                    None
                } else {
                    validate_birthdate(value).map_err(|e| FieldError::InvalidValue {
                        key: key.into(),
                        expected: format!("DD/MM/YYYY ({e})"),
                    })?;
                    Some(value.trim().to_string())
                };
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["sex", "birthdate"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_dir() {
        let mut storage = StorageConfig::default();
        storage.set_field("dir", " /tmp/fit ").unwrap();
        assert_eq!(storage.get_field("dir").unwrap(), "/tmp/fit");
        assert!(storage.set_field("dir", "").is_err());
        assert!(matches!(
            storage.set_field("other", "x"),
            Err(FieldError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_recency_fields() {
        let mut recency = RecencyConfig::default();
        recency.set_field("dwell_secs", "0").unwrap();
        assert_eq!(recency.dwell_secs, 0);
        recency.set_field("display_limit", "25").unwrap();
        assert_eq!(recency.get_field("display_limit").unwrap(), "25");
    }

    #[test]
    fn test_recency_rejects_bad_numbers() {
        let mut recency = RecencyConfig::default();
        assert!(recency.set_field("dwell_secs", "-1").is_err());
        assert!(recency.set_field("dwell_secs", "three").is_err());
        assert!(recency.set_field("display_limit", "0").is_err());
        assert_eq!(recency, RecencyConfig::default());
    }

    #[test]
    fn test_profile_sex() {
        let mut profile = ProfileConfig::default();
        assert_eq!(profile.get_field("sex").unwrap(), "(not set)");

        profile.set_field("sex", "F").unwrap();
        assert_eq!(profile.get_field("sex").unwrap(), "female");

        assert!(profile.set_field("sex", "robot").is_err());
        profile.set_field("sex", "none").unwrap();
        assert!(profile.sex.is_none());
    }

    #[test]
    fn test_profile_birthdate_validated() {
        let mut profile = ProfileConfig::default();
        profile.set_field("birthdate", "15/06/1994").unwrap();
        assert_eq!(profile.get_field("birthdate").unwrap(), "15/06/1994");

        let err = profile.set_field("birthdate", "31/02/1994").unwrap_err();
        assert!(err.to_string().contains("DD/MM/YYYY"));
        assert_eq!(profile.birthdate.as_deref(), Some("15/06/1994"));

        profile.set_field("birthdate", "").unwrap();
        assert!(profile.birthdate.is_none());
    }
}
