//! Experiment configuration
//!
//! An [`ExperimentConfig`] is immutable once built. It can be assembled with
//! the builder, taken from [`ExperimentConfig::default`] (the reference
//! workload), or parsed from JSON. All three paths run the same validation.
//!
//! ```rust
//! use listbench::config::{ConfidenceLevel, ExperimentConfig};
//!
//! let config = ExperimentConfig::builder()
//!     .population(500)
//!     .operations_per_batch(2_000)
//!     .operation_mix(0.90, 0.05, 0.05)
//!     .confidence(ConfidenceLevel::Ninety)
//!     .seed(7)
//!     .build()?;
//!
//! assert_eq!(config.population(), 500);
//! assert!((config.confidence().z_score() - 1.645).abs() < f64::EPSILON);
//! # Ok::<(), listbench::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, VALUE_DOMAIN};

/// Allowed drift of `member + insert + delete` away from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Reference initial population size.
pub const DEFAULT_POPULATION: usize = 1_000;

/// Reference number of operations per batch.
pub const DEFAULT_OPERATIONS_PER_BATCH: usize = 10_000;

/// Reference number of pilot batches.
pub const DEFAULT_PILOT_RUNS: usize = 100;

/// Reference target relative error of the final mean.
pub const DEFAULT_RELATIVE_ERROR: f64 = 0.05;

/// Confidence level with a fixed z-score.
///
/// Only two levels exist; there is no general inverse-normal lookup.
/// Serialized as the plain number (`0.9` / `0.95`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ConfidenceLevel {
    /// 90% confidence (z = 1.645)
    Ninety,
    /// 95% confidence (z = 1.96)
    #[default]
    NinetyFive,
}

impl ConfidenceLevel {
    /// Two-sided z-score for this level.
    #[must_use]
    pub const fn z_score(self) -> f64 {
        match self {
            Self::Ninety => 1.645,
            Self::NinetyFive => 1.96,
        }
    }

    /// Level as a probability.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Ninety => 0.90,
            Self::NinetyFive => 0.95,
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        if (level - 0.90).abs() < PROBABILITY_TOLERANCE {
            Ok(Self::Ninety)
        } else if (level - 0.95).abs() < PROBABILITY_TOLERANCE {
            Ok(Self::NinetyFive)
        } else {
            Err(Error::UnsupportedConfidenceLevel(level))
        }
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.as_f64()
    }
}

/// Probabilities of the three workload operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMix")]
pub struct OperationMix {
    member: f64,
    insert: f64,
    delete: f64,
}

#[derive(Deserialize)]
struct RawMix {
    member: f64,
    insert: f64,
    delete: f64,
}

impl TryFrom<RawMix> for OperationMix {
    type Error = Error;

    fn try_from(raw: RawMix) -> Result<Self> {
        Self::new(raw.member, raw.insert, raw.delete)
    }
}

impl OperationMix {
    /// Create a validated mix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProbabilityConfig`] if any probability is
    /// non-finite or outside `[0, 1]`, or if the sum is not 1.0 within
    /// [`PROBABILITY_TOLERANCE`]. Mixes are rejected, never normalized.
    pub fn new(member: f64, insert: f64, delete: f64) -> Result<Self> {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        let sum = member + insert + delete;

        if !(in_range(member) && in_range(insert) && in_range(delete))
            || (sum - 1.0).abs() > PROBABILITY_TOLERANCE
        {
            return Err(Error::InvalidProbabilityConfig {
                member,
                insert,
                delete,
            });
        }

        Ok(Self {
            member,
            insert,
            delete,
        })
    }

    /// Probability of a membership test.
    #[must_use]
    pub const fn member(&self) -> f64 {
        self.member
    }

    /// Probability of a guarded insert.
    #[must_use]
    pub const fn insert(&self) -> f64 {
        self.insert
    }

    /// Probability of a guarded delete.
    #[must_use]
    pub const fn delete(&self) -> f64 {
        self.delete
    }

    /// Selector threshold below which Member is chosen (`100 * member`).
    #[must_use]
    pub fn member_threshold(&self) -> f64 {
        self.member * 100.0
    }

    /// Selector threshold below which Insert is chosen
    /// (`100 * (member + insert)`).
    #[must_use]
    pub fn insert_threshold(&self) -> f64 {
        (self.member + self.insert) * 100.0
    }
}

impl Default for OperationMix {
    fn default() -> Self {
        Self {
            member: 0.99,
            insert: 0.005,
            delete: 0.005,
        }
    }
}

/// Immutable description of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    mix: OperationMix,
    population: usize,
    operations_per_batch: usize,
    pilot_runs: usize,
    relative_error: f64,
    confidence: ConfidenceLevel,
    seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            mix: OperationMix::default(),
            population: DEFAULT_POPULATION,
            operations_per_batch: DEFAULT_OPERATIONS_PER_BATCH,
            pilot_runs: DEFAULT_PILOT_RUNS,
            relative_error: DEFAULT_RELATIVE_ERROR,
            confidence: ConfidenceLevel::NinetyFive,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Create a builder starting from the reference workload.
    #[must_use]
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their reference values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input (including an invalid
    /// `mix` or `confidence`) and any validation error from
    /// [`ExperimentConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`ExperimentConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every caller contract.
    ///
    /// # Errors
    ///
    /// - [`Error::DomainExhaustion`] if `population >= VALUE_DOMAIN`
    /// - [`Error::InvalidInput`] if `pilot_runs == 0` or the relative error
    ///   is not a finite positive number
    pub fn validate(&self) -> Result<()> {
        if self.population >= VALUE_DOMAIN {
            return Err(Error::DomainExhaustion {
                requested: self.population,
                domain: VALUE_DOMAIN,
            });
        }

        if self.pilot_runs == 0 {
            return Err(Error::InvalidInput(
                "pilot runs must be greater than 0".to_string(),
            ));
        }

        if !(self.relative_error.is_finite() && self.relative_error > 0.0) {
            return Err(Error::InvalidInput(format!(
                "relative error must be a positive number, got {}",
                self.relative_error
            )));
        }

        Ok(())
    }

    /// Operation probabilities.
    #[must_use]
    pub const fn mix(&self) -> &OperationMix {
        &self.mix
    }

    /// Initial population size `n`.
    #[must_use]
    pub const fn population(&self) -> usize {
        self.population
    }

    /// Operations per batch `m`.
    #[must_use]
    pub const fn operations_per_batch(&self) -> usize {
        self.operations_per_batch
    }

    /// Number of pilot batches.
    #[must_use]
    pub const fn pilot_runs(&self) -> usize {
        self.pilot_runs
    }

    /// Target relative error `r`.
    #[must_use]
    pub const fn relative_error(&self) -> f64 {
        self.relative_error
    }

    /// Target confidence level.
    #[must_use]
    pub const fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Explicit RNG seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Builder for `ExperimentConfig`.
#[derive(Debug, Default)]
pub struct ExperimentConfigBuilder {
    config: ExperimentConfig,
    mix: Option<(f64, f64, f64)>,
    confidence: Option<f64>,
}

impl ExperimentConfigBuilder {
    /// Set the member/insert/delete probabilities.
    #[must_use]
    pub const fn operation_mix(mut self, member: f64, insert: f64, delete: f64) -> Self {
        self.mix = Some((member, insert, delete));
        self
    }

    /// Set the initial population size `n`.
    #[must_use]
    pub const fn population(mut self, n: usize) -> Self {
        self.config.population = n;
        self
    }

    /// Set the operations per batch `m`.
    #[must_use]
    pub const fn operations_per_batch(mut self, m: usize) -> Self {
        self.config.operations_per_batch = m;
        self
    }

    /// Set the number of pilot batches.
    #[must_use]
    pub const fn pilot_runs(mut self, runs: usize) -> Self {
        self.config.pilot_runs = runs;
        self
    }

    /// Set the target relative error `r`.
    #[must_use]
    pub const fn relative_error(mut self, r: f64) -> Self {
        self.config.relative_error = r;
        self
    }

    /// Set the confidence level.
    #[must_use]
    pub const fn confidence(mut self, level: ConfidenceLevel) -> Self {
        self.config.confidence = level;
        self.confidence = None;
        self
    }

    /// Set the confidence level from a probability (0.90 or 0.95).
    ///
    /// Checked in [`ExperimentConfigBuilder::build`].
    #[must_use]
    pub const fn confidence_level(mut self, level: f64) -> Self {
        self.confidence = Some(level);
        self
    }

    /// Fix the RNG seed for a reproducible operation sequence.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProbabilityConfig`],
    /// [`Error::UnsupportedConfidenceLevel`], or any error from
    /// [`ExperimentConfig::validate`].
    pub fn build(self) -> Result<ExperimentConfig> {
        let mut config = self.config;

        if let Some((member, insert, delete)) = self.mix {
            config.mix = OperationMix::new(member, insert, delete)?;
        }
        if let Some(level) = self.confidence {
            config.confidence = ConfidenceLevel::try_from(level)?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_workload() {
        let config = ExperimentConfig::default();
        assert_eq!(config.population(), 1_000);
        assert_eq!(config.operations_per_batch(), 10_000);
        assert_eq!(config.pilot_runs(), 100);
        assert!((config.relative_error() - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.confidence(), ConfidenceLevel::NinetyFive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mix_thresholds() {
        let mix = OperationMix::default();
        assert!((mix.member_threshold() - 99.0).abs() < 1e-9);
        assert!((mix.insert_threshold() - 99.5).abs() < 1e-9);
    }

    #[test]
    fn test_mix_rejects_bad_sum() {
        let err = OperationMix::new(0.5, 0.2, 0.2).unwrap_err();
        assert!(matches!(err, Error::InvalidProbabilityConfig { .. }));
    }

    #[test]
    fn test_mix_rejects_out_of_range() {
        assert!(OperationMix::new(1.2, -0.1, -0.1).is_err());
        assert!(OperationMix::new(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_confidence_lookup() {
        assert_eq!(
            ConfidenceLevel::try_from(0.95).unwrap(),
            ConfidenceLevel::NinetyFive
        );
        assert_eq!(ConfidenceLevel::try_from(0.9).unwrap(), ConfidenceLevel::Ninety);
        assert!(matches!(
            ConfidenceLevel::try_from(0.99),
            Err(Error::UnsupportedConfidenceLevel(_))
        ));
    }

    #[test]
    fn test_builder_rejects_domain_exhaustion() {
        let err = ExperimentConfig::builder()
            .population(VALUE_DOMAIN)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DomainExhaustion { .. }));
    }

    #[test]
    fn test_builder_rejects_zero_pilot() {
        let err = ExperimentConfig::builder().pilot_runs(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let config = ExperimentConfig::from_json_str(r#"{"population": 10, "seed": 3}"#).unwrap();
        assert_eq!(config.population(), 10);
        assert_eq!(config.seed(), Some(3));
        assert_eq!(config.pilot_runs(), DEFAULT_PILOT_RUNS);
    }

    #[test]
    fn test_json_rejects_unsupported_confidence() {
        let err = ExperimentConfig::from_json_str(r#"{"confidence": 0.8}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = ExperimentConfig::builder().seed(11).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ExperimentConfig::from_json_str(&json).unwrap(), config);
    }
}
