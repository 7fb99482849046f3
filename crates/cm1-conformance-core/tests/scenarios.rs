// crates/cm1-conformance-core/tests/scenarios.rs
// ============================================================================
// Module: Conformance Scenario Tests
// Description: End-to-end harness runs over small corpora.
// Purpose: Pin the scoring policy and report shape for canonical scenarios.
// Dependencies: cm1-conformance-core
// ============================================================================

//! ## Overview
//! Runs [`ConformanceHarness`] against an in-memory verifier that accepts a
//! certificate iff it starts with SOH (0x01) and ends with EOT (0x04).

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use cm1_conformance_core::ConformanceHarness;
use cm1_conformance_core::InMemoryVerifier;
use cm1_conformance_core::NoopObserver;
use cm1_conformance_core::Observation;
use cm1_conformance_core::RunObserver;
use cm1_conformance_core::RunReport;
use cm1_conformance_core::RunStatus;
use cm1_conformance_core::TestVector;
use cm1_conformance_core::VectorCorpus;
use cm1_conformance_core::VectorMismatch;
use cm1_conformance_core::VectorOutcome;
use cm1_conformance_core::Verdict;
use cm1_conformance_core::VerifierLoadError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const VALID: [u8; 7] = [0x01, 0x02, 0x0E, 0x1E, 0x0F, 0x03, 0x04];
const INVALID: [u8; 3] = [0x02, 0x01, 0x04];

fn framing_decision(bytes: &[u8]) -> i32 {
    i32::from(bytes.first() == Some(&0x01) && bytes.last() == Some(&0x04))
}

fn scenario_a() -> TestVector {
    TestVector::certificate("v1", Verdict::Accept, VALID.to_vec())
}

fn scenario_b() -> TestVector {
    TestVector::certificate("v2", Verdict::Reject, INVALID.to_vec())
}

fn scenario_c() -> TestVector {
    TestVector::structural("v3", Verdict::Reject)
}

fn scenario_d() -> TestVector {
    TestVector::structural("v4", Verdict::Accept)
}

fn run(vectors: Vec<TestVector>) -> (RunReport, usize) {
    let verifier = InMemoryVerifier::new(64, framing_decision);
    let mut harness = ConformanceHarness::new(VectorCorpus::from_vectors(vectors), verifier).unwrap();
    let report = harness.run(&mut NoopObserver);
    (report, harness.into_verifier().calls())
}

/// Observer that records the order of events.
#[derive(Default)]
struct RecordingObserver {
    seen: Vec<(usize, String)>,
    completed: Option<usize>,
}

impl RunObserver for RecordingObserver {
    fn on_vector(&mut self, index: usize, outcome: &VectorOutcome) {
        self.seen.push((index, outcome.name.clone()));
    }

    fn on_complete(&mut self, report: &RunReport) {
        self.completed = Some(report.total);
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Scenario A: accepted valid certificate passes.
#[test]
fn scenario_a_valid_certificate_accepted() {
    let (report, calls) = run(vec![scenario_a()]);
    assert_eq!(report.passed, 1);
    assert_eq!(report.status, RunStatus::Pass);
    assert_eq!(calls, 1);
    assert_eq!(
        report.outcomes[0].observation,
        Observation::Decided {
            raw: 1,
            verdict: Verdict::Accept
        }
    );
}

/// Scenario B: rejected invalid certificate passes.
#[test]
fn scenario_b_invalid_certificate_rejected() {
    let (report, calls) = run(vec![scenario_b()]);
    assert_eq!(report.passed, 1);
    assert!(report.is_success());
    assert_eq!(calls, 1);
}

/// Scenario C: structural REJECT passes without a verifier call.
#[test]
fn scenario_c_structural_reject_passes_without_call() {
    let (report, calls) = run(vec![scenario_c()]);
    assert_eq!(report.passed, 1);
    assert_eq!(calls, 0);
    assert_eq!(report.outcomes[0].observation, Observation::Structural);
}

/// Scenario D: structural ACCEPT always fails and is reported by name.
#[test]
fn scenario_d_structural_accept_fails() {
    let (report, calls) = run(vec![scenario_d()]);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failed_names(), vec!["v4"]);
    assert_eq!(calls, 0);
    assert_eq!(
        report.failures,
        vec![VectorMismatch {
            name: "v4".to_string(),
            expected: Verdict::Accept,
            observed: Verdict::Reject,
        }]
    );
}

/// Scenario E: A and D together give one pass, one failure, failed status.
#[test]
fn scenario_e_mixed_corpus_fails() {
    let (report, _) = run(vec![scenario_a(), scenario_d()]);
    assert_eq!(report.total, 2);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failed_names(), vec!["v4"]);
    assert_eq!(report.status, RunStatus::Fail);
}

// ============================================================================
// SECTION: Run Semantics
// ============================================================================

/// Earlier failures never stop later vectors from being evaluated.
#[test]
fn failures_do_not_abort_the_run() {
    let wrong = TestVector::certificate("wrong", Verdict::Accept, INVALID.to_vec());
    let (report, calls) = run(vec![wrong, scenario_d(), scenario_a(), scenario_b()]);
    assert_eq!(report.total, 4);
    assert_eq!(report.failed_names(), vec!["wrong", "v4"]);
    assert_eq!(calls, 3);
}

/// A long certificate followed by a short one is decided over the short length only.
#[test]
fn stale_arena_bytes_do_not_leak_into_later_vectors() {
    let long = TestVector::certificate("long", Verdict::Accept, vec![0x01, 0x02, 0x03, 0x04]);
    let short = TestVector::certificate("short", Verdict::Reject, vec![0x01, 0x02]);
    let (report, _) = run(vec![long, short]);
    assert!(report.is_success());
}

/// Observers see every vector in order, then the completion event.
#[test]
fn observer_sees_vectors_in_corpus_order() {
    let verifier = InMemoryVerifier::new(16, framing_decision);
    let corpus = VectorCorpus::from_vectors(vec![scenario_c(), scenario_a(), scenario_d()]);
    let mut harness = ConformanceHarness::new(corpus, verifier).unwrap();
    let mut observer = RecordingObserver::default();
    let _ = harness.run(&mut observer);
    assert_eq!(
        observer.seen,
        vec![(0, "v3".to_string()), (1, "v1".to_string()), (2, "v4".to_string())]
    );
    assert_eq!(observer.completed, Some(3));
}

/// An empty corpus is a passing run.
#[test]
fn empty_corpus_passes() {
    let (report, calls) = run(Vec::new());
    assert!(report.is_success());
    assert_eq!(report.total, 0);
    assert_eq!(calls, 0);
}

/// The harness refuses a verifier arena smaller than the largest certificate.
#[test]
fn harness_rejects_insufficient_capacity() {
    let verifier = InMemoryVerifier::new(4, framing_decision);
    let corpus = VectorCorpus::from_vectors(vec![scenario_a(), scenario_c()]);
    let Err(err) = ConformanceHarness::new(corpus, verifier) else {
        panic!("expected capacity error");
    };
    assert!(matches!(
        err,
        VerifierLoadError::InsufficientCapacity {
            required: 7,
            available: 4
        }
    ));
}
