//! Metrics command implementation.
//!
//! This module implements `fittrack metrics` and the input resolution shared
//! with `fittrack history add`: age comes from `--age`, then `--birthdate`,
//! then the profile birthdate; sex from `--sex`, then the profile.

use crate::config::FitConfig;
use crate::metrics::{
    age_today, try_compute_metrics, validate_birthdate, AgeError, BodyMeasurement, BodyMetrics,
    MetricsError, Sex,
};

/// Result type for metrics command operations.
pub type MetricsCommandResult = Result<(), MetricsCommandError>;

/// Error type for metrics command operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The birthdate was rejected.
    #[error("{0}")]
    Age(#[from] AgeError),
    /// The measurement was rejected.
    #[error("{0}")]
    Metrics(#[from] MetricsError),
    /// No age source was available.
    #[error("Age unknown: pass --age or --birthdate, or set profile.birthdate")]
    MissingAge,
    /// No sex source was available.
    #[error("Sex unknown: pass --sex or set profile.sex")]
    MissingSex,
    /// JSON output failed.
    #[error("Failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Age and sex after falling back to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    /// Age in years.
    pub age: u32,
    /// Formula branch.
    pub sex: Sex,
}

/// Resolve age and sex from flags, falling back to the profile in `config`.
pub fn resolve_subject(
    config: &FitConfig,
    age: Option<u32>,
    birthdate: Option<&str>,
    sex: Option<Sex>,
) -> Result<Subject, MetricsCommandError> {
    let age = match (age, birthdate) {
        (Some(age), _) => age,
        (None, Some(b)) => age_today(validate_birthdate(b)?),
        (None, None) => config
            .profile
            .age()
            .ok_or(MetricsCommandError::MissingAge)??,
    };
    let sex = sex
        .or(config.profile.sex)
        .ok_or(MetricsCommandError::MissingSex)?;
    Ok(Subject { age, sex })
}

/// Execute the metrics command.
pub fn metrics(
    measurement: &BodyMeasurement,
    age: Option<u32>,
    birthdate: Option<&str>,
    sex: Option<Sex>,
    json: bool,
) -> MetricsCommandResult {
    let config = FitConfig::load(None)?;
    let subject = resolve_subject(&config, age, birthdate, sex)?;
    let metrics = try_compute_metrics(measurement, subject.age, subject.sex)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!(
            "\x1b[1m=== body metrics ===\x1b[0m \x1b[2m({} y, {})\x1b[0m",
            subject.age, subject.sex
        );
        print_metrics(&metrics);
    }
    Ok(())
}

/// Print metrics as an aligned table.
pub fn print_metrics(metrics: &BodyMetrics) {
    let rows = [
        ("Weight", metrics.weight, "kg"),
        ("BMI", metrics.bmi, "kg/m²"),
        ("Waist-to-hip ratio", metrics.waist_to_hip_ratio, ""),
        ("Body fat", metrics.body_fat_percentage, "%"),
        ("Body surface area", metrics.body_surface_area, "m²"),
        ("Basal metabolic rate", metrics.basal_metabolic_rate, "kcal/day"),
        ("Waist-to-height ratio", metrics.waist_to_height_ratio, ""),
    ];
    for (label, value, unit) in rows {
        println!("  {label:<24} {value:>8.2} {unit}");
    }
}
