//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::metrics::{BodyMeasurement, Sex};
use commands::watch::WatchOptions;

/// Result of running a command.
pub type CliResult = anyhow::Result<()>;

/// Body metrics and workout recency tracking.
///
/// Computes BMI, body fat, BSA, BMR and body ratios from a handful of
/// measurements, keeps a measurement log, and remembers which workout
/// videos were watched most recently.
#[derive(Parser, Debug)]
#[command(name = "fittrack")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Command to run; none prints a short usage summary.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for fittrack.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute body metrics from measurements.
    ///
    /// Age and sex fall back to profile.birthdate and profile.sex.
    ///
    /// Examples:
    ///   fittrack metrics --height 180 --weight 78.5 --waist 85 --hip 95 --age 30 --sex male
    ///   fittrack metrics --height 165 --weight 60 --waist 70 --hip 98 --json
    Metrics(MetricsCommand),

    /// Record and review body measurements.
    #[command(subcommand)]
    History(HistoryCommands),

    /// Watch a workout video and mark it as recently watched.
    ///
    /// The video is recorded once it has been watched for the dwell time.
    /// Press Ctrl-C earlier to leave it unrecorded.
    Watch(WatchCommand),

    /// List recently watched workout videos, newest first.
    Recent(RecentCommand),

    /// View and modify configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Measurement inputs shared by `metrics` and `history add`.
#[derive(Args, Debug, Clone)]
pub struct MeasurementArgs {
    /// Height in centimetres.
    #[arg(long)]
    pub height: f64,

    /// Weight in kilograms.
    #[arg(long)]
    pub weight: f64,

    /// Waist circumference in centimetres.
    #[arg(long)]
    pub waist: f64,

    /// Hip circumference in centimetres.
    #[arg(long)]
    pub hip: f64,

    /// Chest circumference in centimetres (stored, not used by any formula).
    #[arg(long)]
    pub chest: Option<f64>,

    /// Age in years.
    #[arg(short = 'a', long, conflicts_with = "birthdate")]
    pub age: Option<u32>,

    /// Birthdate as DD/MM/YYYY; age is derived from today's date.
    #[arg(short = 'b', long)]
    pub birthdate: Option<String>,

    /// Sex used to pick the formula branch (male or female).
    #[arg(short = 's', long)]
    pub sex: Option<Sex>,
}

impl MeasurementArgs {
    /// Build the measurement from the flags.
    pub fn measurement(&self) -> BodyMeasurement {
        let m = BodyMeasurement::new(self.height, self.weight, self.waist, self.hip);
        match self.chest {
            Some(chest) => m.with_chest(chest),
            None => m,
        }
    }
}

/// Arguments for 'metrics' command.
#[derive(Args, Debug)]
pub struct MetricsCommand {
    /// Measurement inputs.
    #[command(flatten)]
    pub input: MeasurementArgs,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Subcommands for the measurement log.
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Compute metrics and append the measurement to the log.
    Add(HistoryAddCommand),

    /// Show all logged measurements with their metrics.
    List(HistoryListCommand),
}

/// Arguments for 'history add' command.
#[derive(Args, Debug)]
pub struct HistoryAddCommand {
    /// Measurement inputs.
    #[command(flatten)]
    pub input: MeasurementArgs,
}

/// Arguments for 'history list' command.
#[derive(Args, Debug)]
pub struct HistoryListCommand {
    /// Print the log as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for 'watch' command.
#[derive(Args, Debug)]
pub struct WatchCommand {
    /// Video URL. Identifies the video in the recently watched list.
    pub url: String,

    /// Numeric catalogue id.
    #[arg(long)]
    pub id: Option<i64>,

    /// Video title.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Video description.
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Thumbnail URL.
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Seconds to wait before recording (default: recency.dwell_secs).
    #[arg(long, value_name = "SECONDS")]
    pub dwell_secs: Option<u64>,
}

/// Arguments for 'recent' command.
#[derive(Args, Debug)]
pub struct RecentCommand {
    /// Maximum number of videos to show (default: recency.display_limit).
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Print the list as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., recency.dwell_secs).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a section or all config.
    Reset(ConfigResetCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'recency', 'profile').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., recency.dwell_secs).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., recency.dwell_secs).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Section to reset. If omitted, resets all config.
    pub section: Option<String>,
}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys.
    pub key: Option<String>,
}

// ============================================================================
// Command implementations
// ============================================================================

impl MetricsCommand {
    /// Execute the metrics command.
    pub fn execute(&self) -> CliResult {
        let input = &self.input;
        commands::metrics::metrics(
            &input.measurement(),
            input.age,
            input.birthdate.as_deref(),
            input.sex,
            self.json,
        )?;
        Ok(())
    }
}

impl HistoryAddCommand {
    /// Execute the history add command.
    pub fn execute(&self) -> CliResult {
        let input = &self.input;
        commands::history::history_add(
            input.measurement(),
            input.age,
            input.birthdate.as_deref(),
            input.sex,
        )?;
        Ok(())
    }
}

impl HistoryListCommand {
    /// Execute the history list command.
    pub fn execute(&self) -> CliResult {
        commands::history::history_list(self.json)?;
        Ok(())
    }
}

impl WatchCommand {
    /// Execute the watch command.
    pub fn execute(&self) -> CliResult {
        let options = WatchOptions {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            dwell_secs: self.dwell_secs,
        };
        commands::watch::watch(&self.url, &options)?;
        Ok(())
    }
}

impl RecentCommand {
    /// Execute the recent command.
    pub fn execute(&self) -> CliResult {
        commands::recent::recent(self.limit, self.json)?;
        Ok(())
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_show(self.section.as_deref())?;
        Ok(())
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_get(&self.key)?;
        Ok(())
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_set(&self.key, &self.value)?;
        Ok(())
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_reset(self.section.as_deref())?;
        Ok(())
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_explain(self.key.as_deref())?;
        Ok(())
    }
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `warn`. `--verbose` forces `debug`.
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fittrack=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
