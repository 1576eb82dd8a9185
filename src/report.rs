//! Experiment report
//!
//! Plain data: both phases' statistics, the required count, and enough
//! context (seed, configuration, list lengths) to reproduce the run.
//! `Display` gives the human-readable form; JSON export goes through serde.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ExperimentConfig;
use crate::sampling::{Phase, RequiredCount};
use crate::statistics::SamplingStatistics;
use crate::workload::OperationCounts;
use crate::Result;

/// Outcome of one sampling phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Which phase
    pub phase: Phase,
    /// Timed batches executed
    pub runs: usize,
    /// Statistics over the batch durations
    pub statistics: SamplingStatistics,
    /// Operations performed across the phase
    pub operations: OperationCounts,
}

/// Outcome of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Generator seed
    pub seed: u64,
    /// Configuration that was run
    pub config: ExperimentConfig,
    /// List length after population
    pub initial_len: usize,
    /// Pilot phase
    pub pilot: PhaseReport,
    /// Final-phase size derived from the pilot
    pub required: RequiredCount,
    /// Final phase
    pub final_phase: PhaseReport,
    /// List length after the final phase
    pub final_len: usize,
}

impl ExperimentReport {
    /// Timed batches across both phases.
    #[must_use]
    pub const fn total_runs(&self) -> usize {
        self.pilot.runs + self.final_phase.runs
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.statistics;
        write!(
            f,
            "{:<6} {:>6} runs  mean {:.6} s  stddev {:.6} s  ±{:.6} s ({:.0}%)",
            format!("{:?}:", self.phase),
            self.runs,
            stats.mean,
            stats.std_dev,
            stats.margin_of_error,
            stats.confidence.as_f64() * 100.0,
        )?;
        if let Some(rho) = stats.lag1_autocorrelation {
            write!(f, "  lag-1 r {rho:+.3}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mix = self.config.mix();
        writeln!(
            f,
            "Experiment seed {}: n={} m={} member={} insert={} delete={}",
            self.seed,
            self.config.population(),
            self.config.operations_per_batch(),
            mix.member(),
            mix.insert(),
            mix.delete(),
        )?;
        writeln!(f, "  {}", self.pilot)?;
        writeln!(
            f,
            "  Required runs: {} (formula {}, r={})",
            self.required.effective,
            self.required.raw,
            self.config.relative_error(),
        )?;
        writeln!(f, "  {}", self.final_phase)?;
        write!(f, "  List length: {} -> {}", self.initial_len, self.final_len)
    }
}
