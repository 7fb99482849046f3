// crates/cm1-conformance-core/src/evaluator.rs
// ============================================================================
// Module: Vector Evaluator
// Description: Scores one test vector against the verifier capability.
// Purpose: Stage certificates, map raw answers, and apply the structural rule.
// Dependencies: crate::{vectors, verifier}, serde
// ============================================================================

//! ## Overview
//! Evaluation has exactly two paths, chosen by [`VectorKind`]:
//! - Certificate vectors are staged at offset 0 of the verifier arena and
//!   decided over exactly their length.
//! - Structural vectors never reach the verifier. They stand for cases a
//!   geometry/kernel check rejected before any certificate existed, so they
//!   are observed as [`Verdict::Reject`]. A structural vector expecting
//!   `ACCEPT` therefore always fails; that configuration cannot be satisfied
//!   by a certificate verifier.
//!
//! A vector passes iff its observed verdict equals its expectation. Staging
//! or decision faults observe [`Verdict::Reject`] and never abort the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::vectors::Certificate;
use crate::vectors::TestVector;
use crate::vectors::VectorKind;
use crate::vectors::Verdict;
use crate::verifier::Verifier;

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// What the evaluator observed for a vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// The verifier answered.
    Decided {
        /// Raw value returned by the decision call.
        raw: i32,
        /// Verdict mapped from `raw`.
        verdict: Verdict,
    },
    /// The certificate could not be staged or the decision call faulted.
    Fault {
        /// Fault description.
        reason: String,
    },
    /// No certificate; scored by the structural rule without a call.
    Structural,
}

impl Observation {
    /// Returns the verdict this observation stands for.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        match self {
            Self::Decided {
                verdict, ..
            } => *verdict,
            Self::Fault {
                ..
            }
            | Self::Structural => Verdict::Reject,
        }
    }
}

/// Per-vector evaluation result.
///
/// # Invariants
/// - `passed == (observation.verdict() == expected)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorOutcome {
    /// Vector name.
    pub name: String,
    /// Expected verdict.
    pub expected: Verdict,
    /// Observation made by the evaluator.
    pub observation: Observation,
    /// Whether the observation matched the expectation.
    pub passed: bool,
}

impl VectorOutcome {
    /// Builds an outcome, deriving `passed` from the observation.
    fn new(vector: &TestVector, observation: Observation) -> Self {
        let passed = observation.verdict() == vector.expect;
        Self {
            name: vector.name.clone(),
            expected: vector.expect,
            observation,
            passed,
        }
    }

    /// Returns the observed verdict.
    #[must_use]
    pub const fn observed(&self) -> Verdict {
        self.observation.verdict()
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a single vector.
pub fn evaluate_vector<V: Verifier + ?Sized>(verifier: &mut V, vector: &TestVector) -> VectorOutcome {
    let observation = match &vector.kind {
        VectorKind::Certificate(certificate) => decide_certificate(verifier, certificate),
        VectorKind::Structural => Observation::Structural,
    };
    VectorOutcome::new(vector, observation)
}

/// Stages a certificate at offset 0 and decides over its exact length.
fn decide_certificate<V: Verifier + ?Sized>(
    verifier: &mut V,
    certificate: &Certificate,
) -> Observation {
    let bytes = certificate.as_bytes();
    let capacity = verifier.capacity();
    let Some(slot) = verifier.buffer_mut().get_mut(.. bytes.len()) else {
        return Observation::Fault {
            reason: format!(
                "certificate of {} bytes does not fit the {capacity}-byte buffer",
                bytes.len()
            ),
        };
    };
    slot.copy_from_slice(bytes);

    match verifier.decide(0, bytes.len()) {
        Ok(raw) => Observation::Decided {
            raw,
            verdict: Verdict::from_raw(raw),
        },
        Err(err) => Observation::Fault {
            reason: err.to_string(),
        },
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::Observation;
    use super::evaluate_vector;
    use crate::vectors::TestVector;
    use crate::vectors::Verdict;
    use crate::verifier::DecideError;
    use crate::verifier::InMemoryVerifier;
    use crate::verifier::Verifier;

    /// Verifier whose decision call always faults.
    struct FaultingVerifier {
        arena: Vec<u8>,
    }

    impl Verifier for FaultingVerifier {
        fn capacity(&self) -> usize {
            self.arena.len()
        }

        fn buffer_mut(&mut self) -> &mut [u8] {
            &mut self.arena
        }

        fn decide(&mut self, _offset: usize, _length: usize) -> Result<i32, DecideError> {
            Err(DecideError::Fault("unreachable executed".to_string()))
        }
    }

    #[test]
    fn stages_certificate_at_offset_zero_with_exact_length() {
        let mut seen = Vec::new();
        let mut verifier = InMemoryVerifier::new(8, |bytes: &[u8]| {
            seen.push(bytes.to_vec());
            1
        });
        verifier.buffer_mut().fill(0xAA);
        let vector = TestVector::certificate("v", Verdict::Accept, vec![1, 2, 3]);
        let outcome = evaluate_vector(&mut verifier, &vector);
        assert!(outcome.passed);
        drop(verifier);
        assert_eq!(seen, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn unrecognized_raw_answer_rejects() {
        let mut verifier = InMemoryVerifier::new(4, |_: &[u8]| 7);
        let vector = TestVector::certificate("v", Verdict::Reject, vec![1]);
        let outcome = evaluate_vector(&mut verifier, &vector);
        assert_eq!(
            outcome.observation,
            Observation::Decided {
                raw: 7,
                verdict: Verdict::Reject
            }
        );
        assert!(outcome.passed);
    }

    #[test]
    fn oversized_certificate_is_a_fault_not_a_panic() {
        let mut verifier = InMemoryVerifier::new(2, |_: &[u8]| 1);
        let vector = TestVector::certificate("big", Verdict::Accept, vec![0; 3]);
        let outcome = evaluate_vector(&mut verifier, &vector);
        assert!(matches!(outcome.observation, Observation::Fault { .. }));
        assert!(!outcome.passed);
        assert_eq!(verifier.calls(), 0);
    }

    #[test]
    fn decision_fault_observes_reject() {
        let mut verifier = FaultingVerifier {
            arena: vec![0; 4],
        };
        let accept = TestVector::certificate("a", Verdict::Accept, vec![1]);
        let reject = TestVector::certificate("r", Verdict::Reject, vec![1]);
        assert!(!evaluate_vector(&mut verifier, &accept).passed);
        assert!(evaluate_vector(&mut verifier, &reject).passed);
    }

    #[test]
    fn empty_certificate_still_calls_verifier() {
        let mut verifier = InMemoryVerifier::new(0, |bytes: &[u8]| i32::from(bytes.is_empty()));
        let vector = TestVector::certificate("empty", Verdict::Accept, Vec::new());
        let outcome = evaluate_vector(&mut verifier, &vector);
        assert!(outcome.passed);
        assert_eq!(verifier.calls(), 1);
    }
}
