//! Recently watched workout videos.
//!
//! A [`RecencyStore`] keeps an ordered list of [`RecencyEntry`] values, one per
//! video URL, oldest first. Viewing a video again moves it to the end. The list
//! is loaded from a [`KeyValueStore`] once and mirrored back on every write.
//!
//! The store never caps its length; [`RecencyStore::recent`] gives a bounded,
//! newest-first view for display.

pub mod dwell;

pub use dwell::DwellTimer;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the recency list.
pub const RECENCY_KEY: &str = "workouts-history";

/// A workout video. Only `url` is required; it is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Remote row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Source URL.
    pub url: String,
}

impl Video {
    /// Create a video known only by its URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            image: None,
            url: url.into(),
        }
    }

    /// Set the remote id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the display title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the thumbnail URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Name for display, falling back to the URL.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// A video plus the time it was last watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecencyEntry {
    /// When the video was last watched (UTC, ISO-8601 on the wire).
    pub watched_at: DateTime<Utc>,
    /// The watched video.
    pub video: Video,
}

/// Ordered, URL-deduplicated list of watched videos with write-through persistence.
#[derive(Debug)]
pub struct RecencyStore<S> {
    storage: S,
    entries: Vec<RecencyEntry>,
}

/// A recency store shared between tasks.
pub type SharedRecencyStore<S> = Arc<Mutex<RecencyStore<S>>>;

impl<S: KeyValueStore> RecencyStore<S> {
    /// Load the list from `storage`.
    ///
    /// A missing key gives an empty store. Unreadable or corrupt data is
    /// logged and also gives an empty store, since the list is display-only.
    pub fn open(storage: S) -> Self {
        let entries = match read_entries(&storage) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, key = RECENCY_KEY, "discarding unreadable recency list");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "loaded recency list");
        Self { storage, entries }
    }

    /// Load the list from `storage`, failing on unreadable or corrupt data.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let entries = read_entries(&storage)?;
        Ok(Self { storage, entries })
    }

    /// Wrap the store for sharing with a [`DwellTimer`].
    pub fn into_shared(self) -> SharedRecencyStore<S> {
        Arc::new(Mutex::new(self))
    }

    /// Record that `video` was watched now.
    ///
    /// See [`RecencyStore::add_entry_at`].
    pub fn add_entry(&mut self, video: Video) -> Result<(), StorageError> {
        self.add_entry_at(video, Utc::now())
    }

    /// Record that `video` was watched at `at`.
    ///
    /// Any existing entry with the same URL is removed and the new entry is
    /// appended, so it becomes the most recent. The list is persisted
    /// immediately. If persisting fails the in-memory list keeps the update
    /// and the error is logged and returned.
    pub fn add_entry_at(&mut self, video: Video, at: DateTime<Utc>) -> Result<(), StorageError> {
        self.entries.retain(|entry| entry.video.url != video.url);
        debug!(url = %video.url, "recording watched video");
        self.entries.push(RecencyEntry {
            watched_at: at,
            video,
        });

        self.persist().inspect_err(|e| {
            warn!(error = %e, key = RECENCY_KEY, "failed to persist recency list");
        })
    }

    /// All entries, oldest first.
    pub fn list_recent(&self) -> &[RecencyEntry] {
        &self.entries
    }

    /// At most `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &RecencyEntry> {
        self.entries.iter().rev().take(limit)
    }

    /// The most recently watched entry.
    pub fn latest(&self) -> Option<&RecencyEntry> {
        self.entries.last()
    }

    /// Whether a video with this URL has been recorded.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry.video.url == url)
    }

    /// Number of distinct videos recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The persistence collaborator.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize the list in its persisted form.
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let blob = self.to_json()?;
        self.storage.set(RECENCY_KEY, &blob)
    }
}

fn read_entries<S: KeyValueStore>(storage: &S) -> Result<Vec<RecencyEntry>, StorageError> {
    match storage.get(RECENCY_KEY)? {
        Some(blob) => Ok(serde_json::from_str(&blob)?),
        None => Ok(Vec::new()),
    }
}
