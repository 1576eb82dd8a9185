//! Timing sampler
//!
//! One timed batch is one sample: read the clock, run the workload generator
//! once, read the clock again. There are no retries and no warm-up
//! discards.
//!
//! The clock sits behind the [`Clock`] trait so tests can drive the sampler
//! with a deterministic time source. [`MonotonicClock`] is the production
//! implementation.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::{ConfidenceLevel, ExperimentConfig};
use crate::list::LinkedList;
use crate::statistics::SamplingStatistics;
use crate::workload::{self, OperationCounts};
use crate::{Error, Result};

/// Monotonic time source.
///
/// Readings must never go backward within a run.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&mut self) -> Duration;
}

/// [`Clock`] backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// One timed batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchTiming {
    /// Elapsed wall-clock time in seconds
    pub seconds: f64,
    /// What the batch did
    pub counts: OperationCounts,
}

/// Time exactly one workload batch of `config.operations_per_batch()`
/// operations.
pub fn time_one_batch<C, R>(
    list: &mut LinkedList,
    config: &ExperimentConfig,
    clock: &mut C,
    rng: &mut R,
) -> BatchTiming
where
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    let start = clock.now();
    let counts = workload::run_batch(list, config.operations_per_batch(), config.mix(), rng);
    let end = clock.now();

    BatchTiming {
        seconds: end.saturating_sub(start).as_secs_f64(),
        counts,
    }
}

/// Durations of one sampling phase.
///
/// Allocated for the phase's exact, predetermined length; append-only until
/// full, fixed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSample {
    seconds: Vec<f64>,
    capacity: usize,
}

impl TimingSample {
    /// Create an empty sample sized for `runs` batches.
    #[must_use]
    pub fn with_runs(runs: usize) -> Self {
        Self {
            seconds: Vec::with_capacity(runs),
            capacity: runs,
        }
    }

    /// Append one duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the sample is already complete or
    /// the duration is negative or non-finite.
    pub fn record(&mut self, seconds: f64) -> Result<()> {
        if self.is_complete() {
            return Err(Error::InvalidInput(format!(
                "timing sample already holds its {} runs",
                self.capacity
            )));
        }
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "duration must be a non-negative number of seconds, got {seconds}"
            )));
        }
        self.seconds.push(seconds);
        Ok(())
    }

    /// Check if every planned run has been recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.seconds.len() == self.capacity
    }

    /// Number of recorded durations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Planned number of runs.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recorded durations in batch order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.seconds
    }

    /// Reduce the recorded durations to sampling statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySampleSet`] if nothing was recorded.
    pub fn statistics(&self, level: ConfidenceLevel) -> Result<SamplingStatistics> {
        SamplingStatistics::from_samples(&self.seconds, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::populate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Clock advancing a fixed step per reading.
    struct StepClock {
        now: Duration,
        step: Duration,
    }

    impl Clock for StepClock {
        fn now(&mut self) -> Duration {
            self.now += self.step;
            self.now
        }
    }

    #[test]
    fn test_time_one_batch_uses_two_readings() {
        let config = ExperimentConfig::builder()
            .population(10)
            .operations_per_batch(100)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut list = LinkedList::new();
        populate(&mut list, 10, &mut rng).unwrap();

        let mut clock = StepClock {
            now: Duration::ZERO,
            step: Duration::from_millis(250),
        };
        let timing = time_one_batch(&mut list, &config, &mut clock, &mut rng);

        assert!((timing.seconds - 0.25).abs() < 1e-12);
        assert_eq!(timing.counts.total(), 100);
    }

    #[test]
    fn test_monotonic_clock_never_goes_backward() {
        let mut clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_timing_sample_fixed_length() {
        let mut sample = TimingSample::with_runs(2);
        sample.record(0.1).unwrap();
        assert!(!sample.is_complete());
        sample.record(0.2).unwrap();
        assert!(sample.is_complete());

        assert!(matches!(sample.record(0.3), Err(Error::InvalidInput(_))));
        assert_eq!(sample.as_slice(), &[0.1, 0.2]);
    }

    #[test]
    fn test_timing_sample_rejects_negative() {
        let mut sample = TimingSample::with_runs(1);
        assert!(sample.record(-1.0).is_err());
        assert!(sample.record(f64::NAN).is_err());
        assert!(sample.is_empty());
    }

    #[test]
    fn test_empty_sample_statistics() {
        let sample = TimingSample::with_runs(0);
        assert!(matches!(
            sample.statistics(ConfidenceLevel::NinetyFive),
            Err(Error::EmptySampleSet)
        ));
    }
}
