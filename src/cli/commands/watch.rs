//! Watch command implementation.
//!
//! `fittrack watch <url>` holds a video "on screen" for the dwell time and
//! records it in the recently watched list. Ctrl-C before the dwell time
//! elapses records nothing.

use std::time::Duration;

use tracing::info;

use crate::config::FitConfig;
use crate::recency::{DwellTimer, RecencyStore, Video};
use crate::storage::{FileStore, StorageError};

/// Result type for watch command operations.
pub type WatchCommandResult = Result<(), WatchCommandError>;

/// Error type for watch command operations.
#[derive(Debug, thiserror::Error)]
pub enum WatchCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The async runtime could not be started.
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// The URL was empty.
    #[error("Video URL cannot be empty")]
    EmptyUrl,
    /// The video was watched but the list could not be saved.
    #[error("Failed to save recently watched list: {0}")]
    Storage(#[from] StorageError),
}

/// Options for the watch command.
#[derive(Debug, Default, Clone)]
pub struct WatchOptions {
    /// Numeric catalogue identifier.
    pub id: Option<i64>,
    /// Title.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Thumbnail URL.
    pub image: Option<String>,
    /// Override for `recency.dwell_secs`.
    pub dwell_secs: Option<u64>,
}

impl WatchOptions {
    fn video(&self, url: &str) -> Video {
        let mut video = Video::new(url);
        if let Some(id) = self.id {
            video = video.with_id(id);
        }
        if let Some(name) = &self.name {
            video = video.with_name(name);
        }
        if let Some(description) = &self.description {
            video = video.with_description(description);
        }
        if let Some(image) = &self.image {
            video = video.with_image(image);
        }
        video
    }
}

/// Execute the watch command.
pub fn watch(url: &str, options: &WatchOptions) -> WatchCommandResult {
    let url = url.trim();
    if url.is_empty() {
        return Err(WatchCommandError::EmptyUrl);
    }

    let config = FitConfig::load(None)?;
    let dwell = options
        .dwell_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.recency.dwell());
    let video = options.video(url);
    let title = video.display_name().to_string();

    let store = RecencyStore::open(FileStore::new(config.data_dir())).into_shared();
    let runtime = tokio::runtime::Runtime::new()?;

    println!(
        "\x1b[36m▶\x1b[0m Watching {title} \x1b[2m(recorded after {}s, Ctrl-C to stop)\x1b[0m",
        dwell.as_secs()
    );

    let recorded = runtime.block_on(async {
        let mut timer = DwellTimer::new(store, dwell);
        timer.watch(video);

        let finished = tokio::select! {
            outcome = timer.wait() => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        };
        match finished {
            Some(outcome) => outcome,
            // The trigger may have fired just before Ctrl-C.
            None => timer.stop().await,
        }
    })?;

    if recorded {
        info!(url, "video recorded as watched");
        println!("\x1b[32m✓\x1b[0m Added {title} to recently watched");
    } else {
        println!("\x1b[33m⚠\x1b[0m Stopped before {}s; not recorded", dwell.as_secs());
    }
    Ok(())
}
