// crates/cm1-conformance-core/src/runner.rs
// ============================================================================
// Module: Conformance Harness
// Description: Drives a fully initialized corpus and verifier to a report.
// Purpose: Enforce setup preconditions, then evaluate every vector in order.
// Dependencies: crate::{evaluator, observer, report, vectors, verifier}
// ============================================================================

//! ## Overview
//! [`ConformanceHarness`] can only be built from a loaded corpus and a loaded
//! verifier, so evaluation never starts half-initialized. Construction also
//! checks that the verifier arena can hold the largest certificate.
//!
//! Evaluation is single-threaded and sequential. The harness owns the
//! verifier for the run and is the only writer of its arena.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::evaluator::evaluate_vector;
use crate::observer::RunObserver;
use crate::report::ResultAggregator;
use crate::report::RunReport;
use crate::vectors::VectorCorpus;
use crate::verifier::Verifier;
use crate::verifier::VerifierLoadError;

// ============================================================================
// SECTION: Harness
// ============================================================================

/// A corpus paired with the verifier it will be scored against.
pub struct ConformanceHarness<V> {
    /// Immutable corpus.
    corpus: VectorCorpus,
    /// Verifier capability owned for the run.
    verifier: V,
}

impl<V: Verifier> ConformanceHarness<V> {
    /// Pairs a corpus with a verifier.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierLoadError::InsufficientCapacity`] when the verifier
    /// arena is smaller than the largest certificate in the corpus.
    pub fn new(corpus: VectorCorpus, verifier: V) -> Result<Self, VerifierLoadError> {
        let required = corpus.max_certificate_len();
        let available = verifier.capacity();
        if required > available {
            return Err(VerifierLoadError::InsufficientCapacity {
                required,
                available,
            });
        }
        Ok(Self {
            corpus,
            verifier,
        })
    }

    /// Evaluates every vector in corpus order and returns the report.
    ///
    /// Mismatches never stop the pass; all vectors are always evaluated.
    pub fn run<O: RunObserver + ?Sized>(&mut self, observer: &mut O) -> RunReport {
        let mut aggregator = ResultAggregator::new();
        for (index, vector) in self.corpus.vectors().iter().enumerate() {
            let outcome = evaluate_vector(&mut self.verifier, vector);
            observer.on_vector(index, &outcome);
            aggregator.record(outcome);
        }
        let report = aggregator.finish();
        observer.on_complete(&report);
        report
    }

    /// Releases the verifier.
    #[must_use]
    pub fn into_verifier(self) -> V {
        self.verifier
    }
}
