//! Config key metadata for documentation and help.
//!
//! This module provides descriptions, types, defaults, and examples
//! for all config keys, used by `fittrack config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "recency.dwell_secs").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "u64", "string").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    KeyMetadata {
        key: "storage.dir",
        description: "Directory holding the persisted stores. Each store is one JSON file \
                      named after its key.",
        value_type: "directory path",
        default: ".fittrack/data",
        examples: &[".fittrack/data", "/var/lib/fittrack"],
    },
    KeyMetadata {
        key: "recency.dwell_secs",
        description: "Seconds a video must stay on screen before `fittrack watch` records it. \
                      Interrupting earlier records nothing.",
        value_type: "non-negative integer",
        default: "3",
        examples: &["0", "3", "10"],
    },
    KeyMetadata {
        key: "recency.display_limit",
        description: "Number of recently watched videos shown by `fittrack recent` when no \
                      --limit is given. The stored list itself is never truncated.",
        value_type: "positive integer",
        default: "10",
        examples: &["5", "10", "20"],
    },
    KeyMetadata {
        key: "profile.sex",
        description: "Formula branch for body fat and basal metabolic rate when --sex is not \
                      passed.",
        value_type: "male | female",
        default: "(not set)",
        examples: &["male", "female"],
    },
    KeyMetadata {
        key: "profile.birthdate",
        description: "Birthdate used to derive age when neither --age nor --birthdate is \
                      passed.",
        value_type: "DD/MM/YYYY",
        default: "(not set)",
        examples: &["15/06/1994"],
    },
];

/// Look up metadata for a key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}
