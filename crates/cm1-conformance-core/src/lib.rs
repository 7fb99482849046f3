// crates/cm1-conformance-core/src/lib.rs
// ============================================================================
// Module: CM-1 Conformance Core Library
// Description: Public API surface for the CM-1 conformance harness core.
// Purpose: Expose the vector model, verifier capability, and run evaluation.
// Dependencies: crate::{bounded_read, evaluator, observer, report, runner, vectors, verifier}
// ============================================================================

//! ## Overview
//! The conformance core scores a fixed corpus of labeled CM-1 vectors against
//! an opaque accept/reject verifier. It is binding-agnostic: any backend that
//! exposes a byte arena and a decision call can implement [`Verifier`].
//!
//! Invariants:
//! - Every vector is evaluated exactly once, in corpus order.
//! - `passed + failed` always equals the corpus length.
//! - Vectors without a certificate are scored without calling the verifier.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bounded_read;
pub mod evaluator;
pub mod observer;
pub mod report;
pub mod runner;
pub mod vectors;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bounded_read::ReadLimitError;
pub use bounded_read::read_bytes_with_limit;
pub use evaluator::Observation;
pub use evaluator::VectorOutcome;
pub use evaluator::evaluate_vector;
pub use observer::NoopObserver;
pub use observer::RunObserver;
pub use report::ResultAggregator;
pub use report::RunReport;
pub use report::RunStatus;
pub use report::VectorMismatch;
pub use runner::ConformanceHarness;
pub use vectors::Certificate;
pub use vectors::CorpusLimits;
pub use vectors::CorpusLoadError;
pub use vectors::TestVector;
pub use vectors::VectorCorpus;
pub use vectors::VectorKind;
pub use vectors::Verdict;
pub use verifier::ACCEPT_SENTINEL;
pub use verifier::DecideError;
pub use verifier::InMemoryVerifier;
pub use verifier::Verifier;
pub use verifier::VerifierLoadError;
