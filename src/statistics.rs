//! Statistics engine
//!
//! Mean, standard deviation and margin of error over a phase's durations.
//!
//! The standard deviation divides by `N`, not `N - 1`: a phase's batches are
//! treated as the whole population of interest. The sample-size formula in
//! [`crate::sampling`] is calibrated against this convention, so it must
//! not change.
//!
//! Batches run against one long-lived list, so durations form a time
//! series. The confidence interval still treats them as independent; the
//! lag-1 autocorrelation is reported alongside so the approximation can be
//! judged.

use serde::{Deserialize, Serialize};

use crate::config::ConfidenceLevel;
use crate::{Error, Result};

/// Arithmetic mean.
///
/// Accumulated as offsets from the first sample, so a set of identical
/// values has a mean exactly equal to that value.
///
/// # Errors
///
/// Returns [`Error::EmptySampleSet`] if `samples` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn mean(samples: &[f64]) -> Result<f64> {
    let (&first, _) = samples.split_first().ok_or(Error::EmptySampleSet)?;
    let offset: f64 = samples.iter().map(|x| x - first).sum();
    Ok(first + offset / samples.len() as f64)
}

/// Population standard deviation (divide by `N`) around `mean`.
///
/// # Errors
///
/// Returns [`Error::EmptySampleSet`] if `samples` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn std_dev(samples: &[f64], mean: f64) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::EmptySampleSet);
    }
    let sum_sq: f64 = samples.iter().map(|x| (x - mean) * (x - mean)).sum();
    Ok((sum_sq / samples.len() as f64).sqrt())
}

/// Half-width of the confidence interval: `z * stddev / sqrt(count)`.
///
/// # Errors
///
/// Returns [`Error::EmptySampleSet`] if `count == 0`.
#[allow(clippy::cast_precision_loss)]
pub fn margin_of_error(std_dev: f64, count: usize, z: f64) -> Result<f64> {
    if count == 0 {
        return Err(Error::EmptySampleSet);
    }
    Ok(z * std_dev / (count as f64).sqrt())
}

/// Lag-1 autocorrelation of `samples` around `mean`.
///
/// `None` with fewer than two samples or zero variance.
#[must_use]
pub fn lag1_autocorrelation(samples: &[f64], mean: f64) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let denominator: f64 = samples.iter().map(|x| (x - mean) * (x - mean)).sum();
    if denominator == 0.0 {
        return None;
    }
    let numerator: f64 = samples
        .windows(2)
        .map(|pair| (pair[0] - mean) * (pair[1] - mean))
        .sum();
    Some(numerator / denominator)
}

/// Statistics of one sampling phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingStatistics {
    /// Number of samples reduced
    pub count: usize,
    /// Mean batch duration in seconds
    pub mean: f64,
    /// Population standard deviation in seconds
    pub std_dev: f64,
    /// Confidence level the margin was computed for
    pub confidence: ConfidenceLevel,
    /// Half-width of the confidence interval in seconds
    pub margin_of_error: f64,
    /// `(mean - margin, mean + margin)`
    pub confidence_interval: (f64, f64),
    /// Serial correlation between consecutive batches, if defined
    pub lag1_autocorrelation: Option<f64>,
}

impl SamplingStatistics {
    /// Reduce `samples` (seconds) at the given confidence level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySampleSet`] if `samples` is empty.
    pub fn from_samples(samples: &[f64], confidence: ConfidenceLevel) -> Result<Self> {
        let mean = mean(samples)?;
        let std_dev = std_dev(samples, mean)?;
        let margin = margin_of_error(std_dev, samples.len(), confidence.z_score())?;

        Ok(Self {
            count: samples.len(),
            mean,
            std_dev,
            confidence,
            margin_of_error: margin,
            confidence_interval: (mean - margin, mean + margin),
            lag1_autocorrelation: lag1_autocorrelation(samples, mean),
        })
    }

    /// Margin of error as a fraction of the mean.
    ///
    /// `None` when the mean is zero.
    #[must_use]
    pub fn relative_margin(&self) -> Option<f64> {
        (self.mean != 0.0).then(|| self.margin_of_error / self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        let m = mean(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((m - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert!(matches!(mean(&[]), Err(Error::EmptySampleSet)));
    }

    #[test]
    fn test_std_dev_divides_by_n() {
        // deviations: -1, 1 -> sum sq = 2, / N = 1
        let samples = [1.0, 3.0];
        let sd = std_dev(&samples, mean(&samples).unwrap()).unwrap();
        assert!((sd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_identical_is_exact_zero() {
        let samples = [0.1; 7];
        let m = mean(&samples).unwrap();
        assert_eq!(m, 0.1);
        assert_eq!(std_dev(&samples, m).unwrap(), 0.0);
    }

    #[test]
    fn test_std_dev_empty() {
        assert!(matches!(std_dev(&[], 0.0), Err(Error::EmptySampleSet)));
    }

    #[test]
    fn test_margin_of_error_formula() {
        let moe = margin_of_error(2.0, 16, 1.96).unwrap();
        assert!((moe - 0.98).abs() < 1e-12);
        assert!(matches!(margin_of_error(2.0, 0, 1.96), Err(Error::EmptySampleSet)));
    }

    #[test]
    fn test_margin_of_error_decreases_with_count() {
        let small = margin_of_error(1.0, 10, 1.645).unwrap();
        let large = margin_of_error(1.0, 11, 1.645).unwrap();
        assert!(large < small);
    }

    #[test]
    fn test_lag1_autocorrelation() {
        // alternating series is perfectly anti-correlated at lag 1 (up to edge effects)
        let samples = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let rho = lag1_autocorrelation(&samples, 0.0).unwrap();
        assert!(rho < -0.8);

        assert!(lag1_autocorrelation(&[1.0], 1.0).is_none());
        assert!(lag1_autocorrelation(&[2.0, 2.0], 2.0).is_none());
    }

    #[test]
    fn test_sampling_statistics_interval() {
        let stats =
            SamplingStatistics::from_samples(&[1.0, 2.0, 3.0, 4.0], ConfidenceLevel::NinetyFive)
                .unwrap();
        assert_eq!(stats.count, 4);
        let (lo, hi) = stats.confidence_interval;
        assert!((hi - lo - 2.0 * stats.margin_of_error).abs() < 1e-12);
        assert!((stats.mean - (lo + hi) / 2.0).abs() < 1e-12);
        assert!(stats.relative_margin().is_some());
    }
}
