// crates/cm1-conformance-core/src/report.rs
// ============================================================================
// Module: Result Aggregator
// Description: Tallies per-vector outcomes into a binary run report.
// Purpose: Produce pass/fail counts, the failure list, and the run status.
// Dependencies: crate::{evaluator, vectors}, serde
// ============================================================================

//! ## Overview
//! The aggregator consumes outcomes in corpus order and keeps two counters and
//! the list of mismatches. The run is binary: it passes only when no vector
//! failed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::evaluator::VectorOutcome;
use crate::vectors::Verdict;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Overall run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every vector passed.
    Pass,
    /// At least one vector failed.
    Fail,
}

/// A vector whose observed verdict disagreed with its expectation.
///
/// Mismatches are recorded and never abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorMismatch {
    /// Vector name.
    pub name: String,
    /// Expected verdict.
    pub expected: Verdict,
    /// Observed verdict.
    pub observed: Verdict,
}

/// Terminal report for a full corpus pass.
///
/// # Invariants
/// - `passed + failed == total == outcomes.len()`.
/// - `failures` lists mismatches in corpus order.
/// - `status` is [`RunStatus::Pass`] iff `failed == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Overall status.
    pub status: RunStatus,
    /// Number of vectors evaluated.
    pub total: usize,
    /// Number of passing vectors.
    pub passed: usize,
    /// Number of failing vectors.
    pub failed: usize,
    /// Failing vectors in corpus order.
    pub failures: Vec<VectorMismatch>,
    /// Every outcome in corpus order.
    pub outcomes: Vec<VectorOutcome>,
}

impl RunReport {
    /// Returns true when every vector passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Pass
    }

    /// Returns the failing vector names in corpus order.
    #[must_use]
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|failure| failure.name.as_str()).collect()
    }
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// Accumulates outcomes until the corpus has been fully evaluated.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    /// Passing vector count.
    passed: usize,
    /// Failing vector count.
    failed: usize,
    /// Mismatches in corpus order.
    failures: Vec<VectorMismatch>,
    /// Outcomes in corpus order.
    outcomes: Vec<VectorOutcome>,
}

impl ResultAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome.
    pub fn record(&mut self, outcome: VectorOutcome) {
        if outcome.passed {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
            self.failures.push(VectorMismatch {
                name: outcome.name.clone(),
                expected: outcome.expected,
                observed: outcome.observed(),
            });
        }
        self.outcomes.push(outcome);
    }

    /// Finalizes the report.
    #[must_use]
    pub fn finish(self) -> RunReport {
        let status = if self.failed == 0 { RunStatus::Pass } else { RunStatus::Fail };
        RunReport {
            status,
            total: self.outcomes.len(),
            passed: self.passed,
            failed: self.failed,
            failures: self.failures,
            outcomes: self.outcomes,
        }
    }
}
