//! History command implementations.
//!
//! This module implements `fittrack history add` and `fittrack history list`.

use serde::Serialize;

use super::metrics::{print_metrics, resolve_subject, MetricsCommandError};
use crate::config::FitConfig;
use crate::history::{BodyHistory, HistoryError};
use crate::metrics::{BodyMeasurement, BodyMetrics, Sex};
use crate::storage::FileStore;

/// Result type for history command operations.
pub type HistoryCommandResult = Result<(), HistoryCommandError>;

/// Error type for history command operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// Age or sex could not be resolved.
    #[error("{0}")]
    Input(#[from] MetricsCommandError),
    /// The log rejected or failed to store the record.
    #[error("{0}")]
    History(#[from] HistoryError),
    /// JSON output failed.
    #[error("Failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flattened row for `history list --json`.
#[derive(Serialize)]
struct HistoryRow<'a> {
    date: String,
    measurement: &'a BodyMeasurement,
    metrics: BodyMetrics,
}

fn open_history(config: &FitConfig) -> Result<BodyHistory<FileStore>, HistoryError> {
    BodyHistory::open(FileStore::new(config.data_dir()))
}

/// Append a measurement to the log.
pub fn history_add(
    measurement: BodyMeasurement,
    age: Option<u32>,
    birthdate: Option<&str>,
    sex: Option<Sex>,
) -> HistoryCommandResult {
    let config = FitConfig::load(None)?;
    let subject = resolve_subject(&config, age, birthdate, sex)?;

    let mut history = open_history(&config)?;
    let metrics = history.record(measurement, subject.age, subject.sex)?;

    println!(
        "\x1b[32m✓\x1b[0m Recorded measurement #{}",
        history.len()
    );
    print_metrics(&metrics);
    Ok(())
}

/// List logged measurements with their derived metrics.
pub fn history_list(json: bool) -> HistoryCommandResult {
    let config = FitConfig::load(None)?;
    let history = open_history(&config)?;

    if json {
        let rows: Vec<HistoryRow<'_>> = history
            .records()
            .iter()
            .map(|r| HistoryRow {
                date: r.date.to_rfc3339(),
                measurement: &r.measurement,
                metrics: r.metrics(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("\x1b[2mNo measurements recorded yet.\x1b[0m");
        return Ok(());
    }

    println!(
        "\x1b[1m{:<12} {:>7} {:>7} {:>7} {:>7} {:>9}\x1b[0m",
        "Date", "Weight", "BMI", "Fat %", "WHR", "BMR"
    );
    for (date, m) in history.metrics_series() {
        println!(
            "{:<12} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>9.2}",
            date.format("%Y-%m-%d"),
            m.weight,
            m.bmi,
            m.body_fat_percentage,
            m.waist_to_hip_ratio,
            m.basal_metabolic_rate
        );
    }
    Ok(())
}
