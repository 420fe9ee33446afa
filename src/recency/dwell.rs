//! Dwell-time trigger for marking a video as watched.
//!
//! A video counts as watched only after it has been on screen for the dwell
//! time without interruption. [`DwellTimer::watch`] schedules a deferred
//! [`RecencyStore::add_entry`](super::RecencyStore::add_entry) on a Tokio task;
//! switching to another video, calling [`DwellTimer::cancel`], or dropping the
//! timer aborts it. An aborted trigger never touches the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{SharedRecencyStore, Video};
use crate::storage::{KeyValueStore, StorageError};

/// Default dwell time before a video is recorded.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(3);

struct Pending {
    url: String,
    handle: JoinHandle<Result<bool, StorageError>>,
}

/// Cancellable deferred "mark as watched" trigger.
///
/// At most one trigger is pending at a time. Dropping the timer cancels it.
pub struct DwellTimer<S> {
    store: SharedRecencyStore<S>,
    dwell: Duration,
    pending: Option<Pending>,
}

impl<S: KeyValueStore + 'static> DwellTimer<S> {
    /// Create a timer recording into `store` after `dwell`.
    pub fn new(store: SharedRecencyStore<S>, dwell: Duration) -> Self {
        Self {
            store,
            dwell,
            pending: None,
        }
    }

    /// The configured dwell time.
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Start the dwell countdown for `video`.
    ///
    /// Any pending trigger for a different video is cancelled first. Watching
    /// the video that is already pending keeps the running countdown.
    ///
    /// Must be called within a Tokio runtime.
    pub fn watch(&mut self, video: Video) {
        if self.pending_url() == Some(video.url.as_str()) {
            return;
        }
        self.cancel();

        let store = Arc::clone(&self.store);
        let dwell = self.dwell;
        let url = video.url.clone();
        debug!(url = %url, dwell_ms = dwell.as_millis() as u64, "dwell timer started");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            record(&store, video)
        });
        self.pending = Some(Pending { url, handle });
    }

    /// Abort the pending trigger, if any.
    ///
    /// Returns true if a trigger was pending and had not yet fired.
    pub fn cancel(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let was_pending = !pending.handle.is_finished();
        pending.handle.abort();
        if was_pending {
            debug!(url = %pending.url, "dwell timer cancelled");
        }
        was_pending
    }

    /// Abort the pending trigger and report whether it fired first.
    ///
    /// Unlike [`DwellTimer::cancel`], this waits for the task to settle, so a
    /// trigger that fired just before the abort is reported as `Ok(true)`
    /// (or its save error) rather than as cancelled.
    pub async fn stop(&mut self) -> Result<bool, StorageError> {
        let Some(Pending { url, handle }) = self.pending.take() else {
            return Ok(false);
        };
        handle.abort();
        match handle.await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(url = %url, "dwell timer cancelled");
                Ok(false)
            }
        }
    }

    /// Whether a trigger is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// URL of the video whose countdown is running.
    pub fn pending_url(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.url.as_str())
    }

    /// Wait for the pending trigger to fire.
    ///
    /// Returns `Ok(true)` if the video was recorded and saved, and `Ok(false)`
    /// if nothing was pending or the trigger was aborted. A failed save is
    /// returned as the error; the in-memory list still holds the entry.
    /// Dropping this future leaves the trigger pending.
    pub async fn wait(&mut self) -> Result<bool, StorageError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        let outcome = (&mut pending.handle).await.unwrap_or(Ok(false));
        self.pending = None;
        outcome
    }
}

impl<S> Drop for DwellTimer<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

/// Add `video` under the store lock.
///
/// Returns `Ok(false)` if the lock was poisoned and nothing changed.
fn record<S: KeyValueStore>(
    store: &SharedRecencyStore<S>,
    video: Video,
) -> Result<bool, StorageError> {
    match store.lock() {
        Ok(mut store) => store.add_entry(video).map(|()| true),
        Err(_) => {
            warn!(url = %video.url, "recency store lock poisoned; watch not recorded");
            Ok(false)
        }
    }
}
