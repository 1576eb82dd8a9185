//! Population step and randomized workload generator
//!
//! Both draw values uniformly from `[0, VALUE_DOMAIN)` through an explicit
//! generator handle, so a fixed seed replays the same operation sequence.
//!
//! ## Operation routing
//!
//! Each operation draws a selector in `[0, 100)` and compares it against two
//! cumulative thresholds in the fixed order Member → Insert → Delete:
//!
//! ```text
//! selector < 100·member            → Member
//! selector < 100·(member + insert) → Insert
//! otherwise                        → Delete
//! ```
//!
//! Delete is the catch-all: any drift of the thresholds below 100 lands there.
//!
//! ## Guarded mutation
//!
//! Insert and Delete test membership first. A batch therefore never
//! introduces a duplicate, no matter how many batches run against the same
//! long-lived list.

use std::collections::HashSet;
use std::ops::AddAssign;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::OperationMix;
use crate::list::LinkedList;
use crate::{Error, Result, VALUE_DOMAIN};

// VALUE_DOMAIN is 2^16, well inside i32.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const VALUE_UPPER: i32 = VALUE_DOMAIN as i32;

/// Exclusive upper bound of the operation selector.
pub const SELECTOR_RANGE: u32 = 100;

/// One workload operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Membership test only
    Member,
    /// Insert if absent
    Insert,
    /// Delete if present
    Delete,
}

/// What a single guarded operation did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Member: value present
    Found,
    /// Member: value absent
    NotFound,
    /// Insert: value linked
    Inserted,
    /// Insert: value already present, skipped
    AlreadyPresent,
    /// Delete: value unlinked
    Deleted,
    /// Delete: value absent, skipped
    Absent,
}

/// Per-batch tally of operations and their outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    /// Membership tests that found the value
    pub member_hits: u64,
    /// Membership tests that missed
    pub member_misses: u64,
    /// Inserts that linked a node
    pub inserts: u64,
    /// Inserts skipped because the value was present
    pub skipped_inserts: u64,
    /// Deletes that unlinked a node
    pub deletes: u64,
    /// Deletes skipped because the value was absent
    pub skipped_deletes: u64,
}

impl OperationCounts {
    /// Count one outcome.
    pub fn record(&mut self, outcome: OperationOutcome) {
        let slot = match outcome {
            OperationOutcome::Found => &mut self.member_hits,
            OperationOutcome::NotFound => &mut self.member_misses,
            OperationOutcome::Inserted => &mut self.inserts,
            OperationOutcome::AlreadyPresent => &mut self.skipped_inserts,
            OperationOutcome::Deleted => &mut self.deletes,
            OperationOutcome::Absent => &mut self.skipped_deletes,
        };
        *slot += 1;
    }

    /// Operations performed, skipped ones included.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.member_hits
            + self.member_misses
            + self.inserts
            + self.skipped_inserts
            + self.deletes
            + self.skipped_deletes
    }

    /// Net change in list length caused by the counted operations.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn net_growth(&self) -> i64 {
        self.inserts as i64 - self.deletes as i64
    }
}

impl AddAssign for OperationCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.member_hits += rhs.member_hits;
        self.member_misses += rhs.member_misses;
        self.inserts += rhs.inserts;
        self.skipped_inserts += rhs.skipped_inserts;
        self.deletes += rhs.deletes;
        self.skipped_deletes += rhs.skipped_deletes;
    }
}

/// Route a selector to an operation by cumulative thresholds.
///
/// Delete absorbs every selector at or above `insert_threshold`, including
/// the remainder left when the thresholds do not reach 100.
#[must_use]
pub fn select_operation(selector: u32, member_threshold: f64, insert_threshold: f64) -> Operation {
    let selector = f64::from(selector);
    if selector < member_threshold {
        Operation::Member
    } else if selector < insert_threshold {
        Operation::Insert
    } else {
        Operation::Delete
    }
}

/// Draw a value uniformly from `[0, VALUE_DOMAIN)`.
pub fn random_value<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(0..VALUE_UPPER)
}

/// Apply one guarded operation.
///
/// Insert and Delete test membership before mutating, so the list never
/// gains a duplicate and never attempts to unlink an absent value.
pub fn apply_operation(list: &mut LinkedList, operation: Operation, value: i32) -> OperationOutcome {
    match operation {
        Operation::Member => {
            if list.member(value) {
                OperationOutcome::Found
            } else {
                OperationOutcome::NotFound
            }
        }
        Operation::Insert => {
            if list.member(value) {
                OperationOutcome::AlreadyPresent
            } else {
                list.insert(value);
                OperationOutcome::Inserted
            }
        }
        Operation::Delete => {
            if list.member(value) {
                list.delete(value);
                OperationOutcome::Deleted
            } else {
                OperationOutcome::Absent
            }
        }
    }
}

/// Fill `list` with `n` unique random values.
///
/// Uniqueness is checked against a scratch set of the values generated so
/// far; rejected draws are simply redrawn.
///
/// # Errors
///
/// Returns [`Error::DomainExhaustion`] if `n >= VALUE_DOMAIN`.
pub fn populate<R: Rng + ?Sized>(list: &mut LinkedList, n: usize, rng: &mut R) -> Result<()> {
    if n >= VALUE_DOMAIN {
        return Err(Error::DomainExhaustion {
            requested: n,
            domain: VALUE_DOMAIN,
        });
    }

    let mut seen = HashSet::with_capacity(n);
    let mut draws: u64 = 0;
    while seen.len() < n {
        let value = random_value(rng);
        draws += 1;
        if seen.insert(value) {
            list.insert(value);
        }
    }

    debug!(n, draws, len = list.len(), "populated list");
    trace!(?list, "populated chain");
    Ok(())
}

/// Run one batch of `m` randomly routed operations against `list`.
///
/// Every operation counts toward `m`, including skipped inserts and
/// deletes. The list is left in whatever state the batch produced; the next
/// batch continues from it.
pub fn run_batch<R: Rng + ?Sized>(
    list: &mut LinkedList,
    m: usize,
    mix: &OperationMix,
    rng: &mut R,
) -> OperationCounts {
    let member_threshold = mix.member_threshold();
    let insert_threshold = mix.insert_threshold();
    let mut counts = OperationCounts::default();

    for _ in 0..m {
        let selector = rng.gen_range(0..SELECTOR_RANGE);
        let value = random_value(rng);
        let operation = select_operation(selector, member_threshold, insert_threshold);
        let outcome = apply_operation(list, operation, value);
        trace!(value, ?operation, ?outcome, "workload operation");
        counts.record(outcome);
    }

    counts
}
