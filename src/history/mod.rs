//! Dated body-measurement log.
//!
//! Each [`BodyRecord`] keeps the raw measurement plus the age and sex used for
//! the formula branches. Metrics are never stored; [`BodyHistory::metrics_series`]
//! recomputes them on read so a formula change applies to old records too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::{
    compute_metrics, try_compute_metrics, BodyMeasurement, BodyMetrics, MetricsError, Sex,
};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the measurement log.
pub const HISTORY_KEY: &str = "body-history";

/// One logged measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    /// When the measurement was taken (UTC).
    pub date: DateTime<Utc>,
    /// The raw measurement.
    pub measurement: BodyMeasurement,
    /// Age in years at `date`.
    pub age: u32,
    /// Formula branch.
    pub sex: Sex,
}

impl BodyRecord {
    /// Metrics for this record.
    pub fn metrics(&self) -> BodyMetrics {
        compute_metrics(&self.measurement, self.age, self.sex)
    }
}

/// Error type for history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The measurement failed validation and was not recorded.
    #[error(transparent)]
    Invalid(#[from] MetricsError),
    /// The log could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Append-only measurement log with write-through persistence.
#[derive(Debug)]
pub struct BodyHistory<S> {
    storage: S,
    records: Vec<BodyRecord>,
}

impl<S: KeyValueStore> BodyHistory<S> {
    /// Load the log from `storage`. A missing key gives an empty log.
    pub fn open(storage: S) -> Result<Self, HistoryError> {
        let records = match storage.get(HISTORY_KEY)? {
            Some(blob) => serde_json::from_str(&blob).map_err(StorageError::from)?,
            None => Vec::new(),
        };
        Ok(Self { storage, records })
    }

    /// Validate and append a measurement taken now.
    pub fn record(
        &mut self,
        measurement: BodyMeasurement,
        age: u32,
        sex: Sex,
    ) -> Result<BodyMetrics, HistoryError> {
        self.record_at(measurement, age, sex, Utc::now())
    }

    /// Validate and append a measurement taken at `date`.
    ///
    /// Returns the metrics for the new record. Invalid measurements are
    /// rejected and leave the log untouched, as does a failed save.
    pub fn record_at(
        &mut self,
        measurement: BodyMeasurement,
        age: u32,
        sex: Sex,
        date: DateTime<Utc>,
    ) -> Result<BodyMetrics, HistoryError> {
        let metrics = try_compute_metrics(&measurement, age, sex)?;
        self.records.push(BodyRecord {
            date,
            measurement,
            age,
            sex,
        });
        debug!(count = self.records.len(), "appended body record");

        if let Err(e) = self.persist() {
            self.records.pop();
            warn!(error = %e, key = HISTORY_KEY, "failed to persist body history; record dropped");
            return Err(e.into());
        }
        Ok(metrics)
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[BodyRecord] {
        &self.records
    }

    /// The newest record.
    pub fn latest(&self) -> Option<&BodyRecord> {
        self.records.last()
    }

    /// `(date, metrics)` pairs in insertion order, for charting.
    pub fn metrics_series(&self) -> Vec<(DateTime<Utc>, BodyMetrics)> {
        self.records.iter().map(|r| (r.date, r.metrics())).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.records)?;
        self.storage.set(HISTORY_KEY, &blob)
    }
}
