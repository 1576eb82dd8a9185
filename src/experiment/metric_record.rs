//! Metric Record - per-batch time-series data for runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sampling::Phase;

/// A single metric data point.
///
/// Stored as a time series: `run_id` + `key` select the series and `step`
/// orders it. Batch durations use the batch index within its phase as the
/// step, so consecutive batches against the same list stay adjacent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    run_id: String,
    key: String,
    step: u64,
    value: f64,
    timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Create a new metric record stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `run_id` - ID of the parent run
    /// * `key` - Series name (e.g. `pilot_seconds`)
    /// * `step` - Position in the series
    /// * `value` - Metric value
    #[must_use]
    pub fn new(run_id: impl Into<String>, key: impl Into<String>, step: u64, value: f64) -> Self {
        Self {
            run_id: run_id.into(),
            key: key.into(),
            step,
            value,
            timestamp: Utc::now(),
        }
    }

    /// Duration of one timed batch, keyed by its phase.
    #[must_use]
    pub fn batch_duration(run_id: impl Into<String>, phase: Phase, step: u64, seconds: f64) -> Self {
        Self::new(run_id, phase.metric_key(), step, seconds)
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the series key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the position in the series.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Get the metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Get the timestamp when the metric was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
