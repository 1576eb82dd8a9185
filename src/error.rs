//! Error types for listbench
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// listbench error types
///
/// Every variant is a caller-contract violation. None of them is retried:
/// a failed experiment is reported once, as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// Operation probabilities are out of range or do not sum to 1.0
    #[error("Invalid operation mix: member={member}, insert={insert}, delete={delete}\nEach probability must lie in [0, 1] and the three must sum to 1.0")]
    InvalidProbabilityConfig {
        /// Requested member probability
        member: f64,
        /// Requested insert probability
        insert: f64,
        /// Requested delete probability
        delete: f64,
    },

    /// Population size cannot be satisfied with unique values from the domain
    #[error("Cannot draw {requested} unique values from a domain of {domain}\nReduce the initial population size below the domain size")]
    DomainExhaustion {
        /// Requested population size
        requested: usize,
        /// Size of the value domain
        domain: usize,
    },

    /// Confidence level has no fixed z-score
    #[error("Unsupported confidence level: {0}\nOnly 0.90 and 0.95 are supported")]
    UnsupportedConfidenceLevel(f64),

    /// Statistics requested over zero samples
    #[error("Statistics requested over an empty sample set")]
    EmptySampleSet,

    /// Other invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
