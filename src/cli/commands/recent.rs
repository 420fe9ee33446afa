//! Recent command implementation.
//!
//! This module implements `fittrack recent`, listing recently watched videos
//! newest first.

use chrono::Local;

use crate::config::FitConfig;
use crate::recency::{RecencyEntry, RecencyStore};
use crate::storage::FileStore;

/// Result type for recent command operations.
pub type RecentCommandResult = Result<(), RecentCommandError>;

/// Error type for recent command operations.
#[derive(Debug, thiserror::Error)]
pub enum RecentCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// JSON output failed.
    #[error("Failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Execute the recent command.
pub fn recent(limit: Option<usize>, json: bool) -> RecentCommandResult {
    let config = FitConfig::load(None)?;
    let limit = limit.unwrap_or(config.recency.display_limit);
    let store = RecencyStore::open(FileStore::new(config.data_dir()));
    let entries: Vec<&RecencyEntry> = store.recent(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("\x1b[2mNo workouts watched yet.\x1b[0m");
        return Ok(());
    }

    println!("\x1b[1mRecently watched\x1b[0m");
    for entry in entries {
        let when = entry.watched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!(
            "  \x1b[2m{when}\x1b[0m  {}  \x1b[36m{}\x1b[0m",
            entry.video.display_name(),
            entry.video.url
        );
    }
    Ok(())
}
