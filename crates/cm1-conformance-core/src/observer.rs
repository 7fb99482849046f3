// crates/cm1-conformance-core/src/observer.rs
// ============================================================================
// Module: Run Observer
// Description: Observability hooks for vector evaluation.
// Purpose: Let callers trace a run without hard logging dependencies.
// Dependencies: crate::{evaluator, report}
// ============================================================================

//! ## Overview
//! Observers see each outcome as soon as it is produced and the final report
//! once the corpus is exhausted. The harness itself never writes output; the
//! CLI plugs in a JSON-lines observer when tracing is requested.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::evaluator::VectorOutcome;
use crate::report::RunReport;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Receives run events in corpus order.
pub trait RunObserver {
    /// Called after each vector is evaluated.
    fn on_vector(&mut self, index: usize, outcome: &VectorOutcome);

    /// Called once after the last vector.
    fn on_complete(&mut self, _report: &RunReport) {}
}

/// No-op observer.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_vector(&mut self, _index: usize, _outcome: &VectorOutcome) {}
}
