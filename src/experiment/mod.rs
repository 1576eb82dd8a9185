//! Experiment tracking
//!
//! Records benchmark experiments, their runs, and the per-batch time series
//! they produce.
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRecord (1) ──< RunRecord (N)
//!                              │
//!                              └──< MetricRecord (N) [time-series]
//! ```
//!
//! An experiment holds a snapshot of its [`crate::config::ExperimentConfig`].
//! Each call to [`crate::sampling::Experiment::run_tracked`] adds one run and
//! one metric per timed batch (`pilot_seconds` / `final_seconds`, stepped
//! by batch index within the phase), so the ordering of the durations
//! survives for later inspection.
//!
//! ## Usage
//!
//! ```rust
//! use listbench::config::ExperimentConfig;
//! use listbench::experiment::ExperimentStore;
//! use listbench::sampling::Experiment;
//!
//! let config = ExperimentConfig::builder()
//!     .population(50)
//!     .operations_per_batch(50)
//!     .pilot_runs(5)
//!     .relative_error(1.0)
//!     .seed(3)
//!     .build()?;
//!
//! let mut store = ExperimentStore::new();
//! let report = Experiment::new(config)?.run_tracked(&mut store, "exp-001", "run-001")?;
//!
//! let pilot = store.get_metrics_for_run("run-001", "pilot_seconds");
//! assert_eq!(pilot.len(), report.pilot.runs);
//! # Ok::<(), listbench::Error>(())
//! ```

mod experiment_record;
mod metric_record;
mod run_record;
mod store;

pub use experiment_record::ExperimentRecord;
pub use metric_record::MetricRecord;
pub use run_record::{RunRecord, RunStatus};
pub use store::ExperimentStore;
