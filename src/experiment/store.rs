//! Experiment Store - in-memory storage for experiment tracking data

use std::collections::HashMap;

use super::{ExperimentRecord, MetricRecord, RunRecord};
use crate::config::ConfidenceLevel;
use crate::statistics::SamplingStatistics;
use crate::Result;

/// In-memory store for experiment tracking data.
///
/// Experiments and runs are keyed by ID. Metrics are kept in insertion
/// order and sorted by step on query.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    experiments: HashMap<String, ExperimentRecord>,
    runs: HashMap<String, RunRecord>,
    metrics: Vec<MetricRecord>,
}

impl ExperimentStore {
    /// Create a new empty experiment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store is empty (no experiments, runs, or metrics).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.runs.is_empty() && self.metrics.is_empty()
    }

    /// Get the number of experiments in the store.
    #[must_use]
    pub fn experiment_count(&self) -> usize {
        self.experiments.len()
    }

    /// Get the number of runs in the store.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get the number of metrics in the store.
    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Add an experiment, replacing any record with the same ID.
    pub fn add_experiment(&mut self, experiment: ExperimentRecord) {
        self.experiments
            .insert(experiment.experiment_id().to_string(), experiment);
    }

    /// Get an experiment by ID.
    #[must_use]
    pub fn get_experiment(&self, experiment_id: &str) -> Option<&ExperimentRecord> {
        self.experiments.get(experiment_id)
    }

    /// Add a run, replacing any record with the same ID.
    pub fn add_run(&mut self, run: RunRecord) {
        self.runs.insert(run.run_id().to_string(), run);
    }

    /// Get a run by ID.
    #[must_use]
    pub fn get_run(&self, run_id: &str) -> Option<&RunRecord> {
        self.runs.get(run_id)
    }

    /// Get all runs for an experiment.
    #[must_use]
    pub fn get_runs_for_experiment(&self, experiment_id: &str) -> Vec<&RunRecord> {
        self.runs
            .values()
            .filter(|run| run.experiment_id() == experiment_id)
            .collect()
    }

    /// Add a metric to the store.
    pub fn add_metric(&mut self, metric: MetricRecord) {
        self.metrics.push(metric);
    }

    /// Get metrics for a specific run and key, ordered by step.
    ///
    /// ```rust
    /// use listbench::experiment::{ExperimentStore, MetricRecord};
    ///
    /// let mut store = ExperimentStore::new();
    /// for step in (0..10).rev() {
    ///     store.add_metric(MetricRecord::new("run-001", "pilot_seconds", step, 0.01));
    /// }
    ///
    /// let series = store.get_metrics_for_run("run-001", "pilot_seconds");
    /// assert_eq!(series.len(), 10);
    /// assert_eq!(series[0].step(), 0);
    /// ```
    #[must_use]
    pub fn get_metrics_for_run(&self, run_id: &str, key: &str) -> Vec<MetricRecord> {
        let mut metrics: Vec<MetricRecord> = self
            .metrics
            .iter()
            .filter(|m| m.run_id() == run_id && m.key() == key)
            .cloned()
            .collect();

        // Sort by step for time-series ordering
        metrics.sort_by_key(MetricRecord::step);

        metrics
    }

    /// Recompute sampling statistics over a stored series.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptySampleSet`] if the series is empty.
    pub fn summarize(
        &self,
        run_id: &str,
        key: &str,
        confidence: ConfidenceLevel,
    ) -> Result<SamplingStatistics> {
        let values: Vec<f64> = self
            .get_metrics_for_run(run_id, key)
            .iter()
            .map(MetricRecord::value)
            .collect();
        SamplingStatistics::from_samples(&values, confidence)
    }
}
