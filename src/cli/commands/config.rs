//! Config command implementations.
//!
//! This module implements the `fittrack config` subcommands for managing
//! configuration without editing JSON directly.

use crate::config::{
    metadata::{self, KeyMetadata},
    FieldError, FitConfig,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be read or written.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The named section does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(section_filter: Option<&str>) -> ConfigCommandResult {
    let config = FitConfig::load(None)?;

    println!("\x1b[1m=== fittrack config ===\x1b[0m");
    println!();

    let sections: Vec<&str> = if let Some(filter) = section_filter {
        if FitConfig::fields_for_section(filter).is_some() {
            vec![filter]
        } else {
            return Err(ConfigCommandError::UnknownSection(filter.into()));
        }
    } else {
        FitConfig::section_names().to_vec()
    };

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = FitConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
                println!("  {:<24} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(key: &str) -> ConfigCommandResult {
    let config = FitConfig::load(None)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value.
pub fn config_set(key: &str, value: &str) -> ConfigCommandResult {
    let mut config = FitConfig::load(None)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.save(None)?;

    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}"),
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset a section, or all config, to defaults.
pub fn config_reset(section: Option<&str>) -> ConfigCommandResult {
    let mut config = FitConfig::load(None)?;

    match section {
        Some(s) => {
            if FitConfig::fields_for_section(s).is_none() {
                return Err(ConfigCommandError::UnknownSection(s.into()));
            }
            config.reset_section(s)?;
            println!("\x1b[32m✓\x1b[0m Reset section '{s}' to defaults");
        }
        None => {
            config = FitConfig::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    config.save(None)?;
    Ok(())
}

/// Show documentation for one key, or list all keys.
pub fn config_explain(key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => {
            let meta = metadata::get_metadata(k)
                .ok_or_else(|| ConfigCommandError::FieldError(FieldError::UnknownKey(k.into())))?;
            print_key_help(meta);
        }
        None => {
            println!("\x1b[1m=== fittrack config keys ===\x1b[0m");
            println!();
            for meta in metadata::METADATA {
                println!("  \x1b[36m{:<24}\x1b[0m {}", meta.key, meta.value_type);
            }
        }
    }
    Ok(())
}

fn print_key_help(meta: &KeyMetadata) {
    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m    {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m {}", meta.default);
    if !meta.examples.is_empty() {
        println!("  \x1b[2mExamples:\x1b[0m {}", meta.examples.join(", "));
    }
}
