//! fittrack - body metrics and workout recency tracking.
//!
//! This library provides the core of the fittrack CLI tool: a pure metrics
//! engine turning raw measurements into BMI, body fat, BSA, BMR and body
//! ratios, an append-only measurement log, and a recency store of watched
//! workout videos with a cancellable dwell-time trigger. Both stores persist
//! through the [`KeyValueStore`] seam.

#![warn(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod history;
pub mod metrics;
pub mod recency;
pub mod storage;

// Re-export key types for convenience
pub use history::BodyHistory;
pub use metrics::{compute_metrics, try_compute_metrics, BodyMeasurement, BodyMetrics, Sex};
pub use recency::{DwellTimer, RecencyEntry, RecencyStore, Video};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
