//! ConfigField trait for dynamic get/set access to config sections.
//!
//! This module provides a trait-based abstraction for accessing config
//! fields by name, enabling the `fittrack config` CLI commands.

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
///
/// Each config section implements this trait to enable field access by name.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("recency.dwell_secs") // Ok(("recency", "dwell_secs"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional value for display.
pub fn format_optional<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "(not set)".to_string())
}

/// Whether a user-supplied value means "clear this optional field".
pub fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "(not set)" || value.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("recency.dwell_secs").unwrap();
        assert_eq!(section, "recency");
        assert_eq!(field, "dwell_secs");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_format_optional_some() {
        let opt = Some("value".to_string());
        assert_eq!(format_optional(&opt), "value");
    }

    #[test]
    fn test_format_optional_none() {
        let opt: Option<String> = None;
        assert_eq!(format_optional(&opt), "(not set)");
    }

    #[test]
    fn test_is_unset() {
        assert!(is_unset(""));
        assert!(is_unset("  "));
        assert!(is_unset("None"));
        assert!(is_unset("(not set)"));
        assert!(!is_unset("male"));
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("foo.bar".into());
        assert_eq!(err.to_string(), "Unknown config key: foo.bar");

        let err = FieldError::InvalidValue {
            key: "dwell_secs".into(),
            expected: "non-negative integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for dwell_secs: expected non-negative integer"
        );

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
