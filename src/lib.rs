//! # listbench: Two-Phase Linked-List Micro-Benchmark
//!
//! Estimates the mean execution time of a mixed member/insert/delete
//! workload on a singly-linked list, to a target relative error at a fixed
//! confidence level.
//!
//! ## Procedure
//!
//! 1. Populate one list with `n` unique random values from `[0, 65536)`.
//! 2. **Pilot**: time a fixed number of workload batches (`m` operations
//!    each) and reduce them to a mean and a population stddev.
//! 3. **Sizing**: `required = floor((z·stddev / (r·mean))²)`, at least one.
//! 4. **Final**: time `required` further batches on the same list.
//!
//! This is the serial baseline: one thread, one list per experiment, one
//! explicitly seeded generator.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use listbench::config::ExperimentConfig;
//! use listbench::sampling::Experiment;
//!
//! // Reference workload: n=1000, m=10000, 99% member, 100 pilot runs, r=5%, 95%
//! let report = Experiment::new(ExperimentConfig::default())?.run()?;
//! println!("{report}");
//! # Ok::<(), listbench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod list;
pub mod report;
pub mod sampling;
pub mod statistics;
pub mod timing;
pub mod workload;

pub use config::{ConfidenceLevel, ExperimentConfig, OperationMix};
pub use error::{Error, Result};
pub use report::{ExperimentReport, PhaseReport};
pub use sampling::Experiment;

/// Number of distinct values workload and population draw from (`2^16`).
pub const VALUE_DOMAIN: usize = 1 << 16;
