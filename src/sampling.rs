//! Two-phase sample-size controller
//!
//! An experiment runs in exactly two rounds against one list:
//!
//! 1. **Pilot**: `pilot_runs` timed batches, reduced to a mean and stddev.
//! 2. **Final**: `floor((z·stddev / (r·mean))²)` further timed batches,
//!    continuing from the list state the pilot left behind.
//!
//! The required count is computed once from the pilot. There is no
//! re-estimation after each batch and no early stop, so the final
//! statistics always describe a predetermined number of batches.
//!
//! A formula value of zero is raised to [`MIN_FINAL_RUNS`]; the final phase
//! is never empty.
//!
//! ```rust
//! use listbench::config::ExperimentConfig;
//! use listbench::sampling::Experiment;
//!
//! let config = ExperimentConfig::builder()
//!     .population(100)
//!     .operations_per_batch(100)
//!     .pilot_runs(10)
//!     .relative_error(0.5)
//!     .seed(1)
//!     .build()?;
//!
//! let report = Experiment::new(config)?.run()?;
//! assert_eq!(report.pilot.runs, 10);
//! assert_eq!(report.final_phase.runs, report.required.effective);
//! # Ok::<(), listbench::Error>(())
//! ```

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ConfidenceLevel, ExperimentConfig};
use crate::experiment::{ExperimentRecord, ExperimentStore, MetricRecord, RunRecord, RunStatus};
use crate::list::LinkedList;
use crate::report::{ExperimentReport, PhaseReport};
use crate::statistics::SamplingStatistics;
use crate::timing::{self, Clock, MonotonicClock, TimingSample};
use crate::workload::{self, OperationCounts};
use crate::{Error, Result};

/// Lower bound on the number of final-phase batches.
pub const MIN_FINAL_RUNS: usize = 1;

/// Metric key for the list length after each batch.
pub const LIST_LEN_METRIC: &str = "container_len";

/// Sampling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Fixed-size variance estimation round
    Pilot,
    /// Round sized from the pilot statistics
    Final,
}

impl Phase {
    /// Metric key under which this phase's batch durations are tracked.
    #[must_use]
    pub const fn metric_key(self) -> &'static str {
        match self {
            Self::Pilot => "pilot_seconds",
            Self::Final => "final_seconds",
        }
    }
}

/// Upper bound on the number of final-phase batches.
///
/// Pilot statistics whose formula value exceeds this are rejected rather
/// than run; the usual cause is a `relative_error` far below the noise of
/// the timer.
pub const MAX_FINAL_RUNS: usize = 10_000_000;

/// Final-phase batch count derived from the pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCount {
    /// Truncated formula value
    pub raw: usize,
    /// Batches actually run: `max(raw, MIN_FINAL_RUNS)`
    pub effective: usize,
}

/// Size the final phase from pilot statistics.
///
/// `raw = floor((z · stddev / (r · mean))²)`, truncated toward zero. A
/// zero-variance pilot (including an all-zero one) yields `raw = 0`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the formula value is infinite or
/// exceeds [`MAX_FINAL_RUNS`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops
)]
pub fn required_sample_count(
    pilot: &SamplingStatistics,
    relative_error: f64,
    confidence: ConfidenceLevel,
) -> Result<RequiredCount> {
    let ratio = confidence.z_score() * pilot.std_dev / (relative_error * pilot.mean);
    // 0/0: every pilot batch took no measurable time
    let squared = if ratio.is_nan() { 0.0 } else { ratio * ratio };

    if !squared.is_finite() || squared >= (MAX_FINAL_RUNS + 1) as f64 {
        return Err(Error::InvalidInput(format!(
            "required final run count {squared:e} exceeds the limit of {MAX_FINAL_RUNS} \
             (mean={}, stddev={}, relative_error={relative_error})",
            pilot.mean, pilot.std_dev
        )));
    }

    let raw = squared as usize;
    Ok(RequiredCount {
        raw,
        effective: raw.max(MIN_FINAL_RUNS),
    })
}

/// One timed batch as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchEvent {
    /// Phase the batch belongs to
    pub phase: Phase,
    /// Index within the phase
    pub step: usize,
    /// Index across both phases
    pub batch: usize,
    /// Elapsed seconds
    pub seconds: f64,
    /// List length after the batch
    pub list_len: usize,
}

/// Two-phase benchmark of the linked list under a mixed workload.
///
/// Owns the generator handle: consecutive [`Experiment::run`] calls share
/// nothing but the random stream, and each builds and releases its own
/// list.
pub struct Experiment<C: Clock = MonotonicClock> {
    config: ExperimentConfig,
    seed: u64,
    rng: StdRng,
    clock: C,
}

impl Experiment<MonotonicClock> {
    /// Create an experiment timed by the monotonic wall clock.
    ///
    /// # Errors
    ///
    /// Returns any validation error of the configuration.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> Experiment<C> {
    /// Create an experiment timed by `clock`.
    ///
    /// Without an explicit seed in `config`, the generator is seeded once
    /// from the wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns any validation error of the configuration.
    pub fn with_clock(config: ExperimentConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let seed = config.seed().unwrap_or_else(wall_clock_seed);

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            config,
            clock,
        })
    }

    /// Seed of the generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration this experiment runs.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Populate a fresh list, run the pilot and final phases, release the
    /// list, and report both phases.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DomainExhaustion`] if the population cannot be
    /// drawn, [`crate::Error::InvalidInput`] if the pilot asks for more than
    /// [`MAX_FINAL_RUNS`] final batches, or a statistics error if a phase
    /// recorded no samples.
    pub fn run(&mut self) -> Result<ExperimentReport> {
        self.run_observed(|_| {})
    }

    /// Run like [`Experiment::run`] and record the run into `store`.
    ///
    /// The experiment record (with a configuration snapshot) is created on
    /// first use of `experiment_id`. Every batch duration is stored under its
    /// phase's metric key, and the list length under [`LIST_LEN_METRIC`].
    /// The run is marked `Failed` if the procedure errors.
    ///
    /// # Errors
    ///
    /// As [`Experiment::run`], plus [`crate::Error::Json`] if the
    /// configuration snapshot cannot be serialized.
    pub fn run_tracked(
        &mut self,
        store: &mut ExperimentStore,
        experiment_id: &str,
        run_id: &str,
    ) -> Result<ExperimentReport> {
        if store.get_experiment(experiment_id).is_none() {
            store.add_experiment(ExperimentRecord::for_config(
                experiment_id,
                "linked-list mixed workload",
                &self.config,
            )?);
        }

        let mut run = RunRecord::seeded(run_id, experiment_id, self.seed);
        run.start();

        let result = self.run_observed(|event| {
            store.add_metric(MetricRecord::batch_duration(
                run_id,
                event.phase,
                event.step as u64,
                event.seconds,
            ));
            #[allow(clippy::cast_precision_loss)]
            store.add_metric(MetricRecord::new(
                run_id,
                LIST_LEN_METRIC,
                event.batch as u64,
                event.list_len as f64,
            ));
        });

        match &result {
            Ok(_) => run.complete(RunStatus::Success),
            Err(err) => {
                warn!(run_id, %err, "tracked run failed");
                run.complete(RunStatus::Failed);
            }
        }
        store.add_run(run);

        result
    }

    fn run_observed(&mut self, mut observer: impl FnMut(BatchEvent)) -> Result<ExperimentReport> {
        let config = self.config.clone();
        info!(
            seed = self.seed,
            n = config.population(),
            m = config.operations_per_batch(),
            member = config.mix().member(),
            insert = config.mix().insert(),
            delete = config.mix().delete(),
            pilot_runs = config.pilot_runs(),
            relative_error = config.relative_error(),
            confidence = config.confidence().as_f64(),
            "starting experiment"
        );

        let mut list = LinkedList::new();
        workload::populate(&mut list, config.population(), &mut self.rng)?;
        let initial_len = list.len();

        let pilot = self.run_phase(Phase::Pilot, config.pilot_runs(), 0, &mut list, &mut observer)?;
        info!(
            mean = pilot.statistics.mean,
            std_dev = pilot.statistics.std_dev,
            "pilot phase complete"
        );

        let required =
            required_sample_count(&pilot.statistics, config.relative_error(), config.confidence())?;
        if required.raw < MIN_FINAL_RUNS {
            warn!(
                raw = required.raw,
                effective = required.effective,
                "required sample count below minimum, raising"
            );
        }
        info!(raw = required.raw, effective = required.effective, "final phase sized");

        let final_phase = self.run_phase(
            Phase::Final,
            required.effective,
            pilot.runs,
            &mut list,
            &mut observer,
        )?;
        info!(
            mean = final_phase.statistics.mean,
            std_dev = final_phase.statistics.std_dev,
            "final phase complete"
        );

        let final_len = list.len();
        drop(list);

        Ok(ExperimentReport {
            seed: self.seed,
            config,
            initial_len,
            pilot,
            required,
            final_phase,
            final_len,
        })
    }

    fn run_phase(
        &mut self,
        phase: Phase,
        runs: usize,
        first_batch: usize,
        list: &mut LinkedList,
        observer: &mut impl FnMut(BatchEvent),
    ) -> Result<PhaseReport> {
        let mut sample = TimingSample::with_runs(runs);
        let mut operations = OperationCounts::default();

        for step in 0..runs {
            let timing = timing::time_one_batch(list, &self.config, &mut self.clock, &mut self.rng);
            sample.record(timing.seconds)?;
            operations += timing.counts;

            debug!(?phase, step, seconds = timing.seconds, len = list.len(), "timed batch");
            observer(BatchEvent {
                phase,
                step,
                batch: first_batch + step,
                seconds: timing.seconds,
                list_len: list.len(),
            });
        }

        Ok(PhaseReport {
            phase,
            runs,
            statistics: sample.statistics(self.config.confidence())?,
            operations,
        })
    }
}

fn wall_clock_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().map_or(0, i64::unsigned_abs)
}
