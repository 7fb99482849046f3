// crates/cm1-conformance-cli/src/output.rs
// ============================================================================
// Module: CLI Report Output
// Description: Renders run reports and trace events for the CLI.
// Purpose: Keep the stdout/stderr contract testable without the binary.
// Dependencies: cm1-conformance-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The text summary follows the CI contract: a passing run writes a single
//! line to stdout; a failing run writes one `FAIL: <name>` line per failing
//! vector to stderr, followed by a summary line. The JSON report replaces
//! the text summary on stdout. Trace events are JSON lines and are only
//! written when tracing is requested.
//!
//! ## Invariants
//! - A failing run never writes to stdout in text mode.
//! - Trace write failures are latched and reported once after the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use cm1_conformance_core::RunObserver;
use cm1_conformance_core::RunReport;
use cm1_conformance_core::RunStatus;
use cm1_conformance_core::VectorOutcome;
use serde::Serialize;

use crate::t;

// ============================================================================
// SECTION: Text Summary
// ============================================================================

/// Human-readable summary split by destination stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSummary {
    /// Lines destined for stdout.
    pub stdout: Vec<String>,
    /// Lines destined for stderr.
    pub stderr: Vec<String>,
}

/// Renders the text summary for a finished run.
#[must_use]
pub fn render_text(report: &RunReport) -> TextSummary {
    if report.is_success() {
        return TextSummary {
            stdout: vec![t!("run.passed", passed = report.total)],
            stderr: Vec::new(),
        };
    }
    let mut stderr: Vec<String> =
        report.failed_names().into_iter().map(|name| t!("run.vector_failed", name = name)).collect();
    stderr.push(t!("run.failed", failed = report.failed));
    TextSummary {
        stdout: Vec::new(),
        stderr,
    }
}

// ============================================================================
// SECTION: JSON Report
// ============================================================================

/// Renders the full run report as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

// ============================================================================
// SECTION: Trace Observer
// ============================================================================

/// One JSON-lines trace event.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum TraceEvent<'a> {
    /// A vector was evaluated.
    Vector {
        /// Position in the corpus.
        index: usize,
        /// Evaluation outcome.
        outcome: &'a VectorOutcome,
    },
    /// The corpus was exhausted.
    Complete {
        /// Overall status.
        status: RunStatus,
        /// Vectors evaluated.
        total: usize,
        /// Passing vectors.
        passed: usize,
        /// Failing vectors.
        failed: usize,
    },
}

/// Run observer writing one JSON object per line.
///
/// # Invariants
/// - After the first write error no further events are written.
pub struct JsonLinesObserver<W: Write> {
    /// Destination writer.
    writer: W,
    /// First write error, if any.
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesObserver<W> {
    /// Creates an observer over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the first write error and clears it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consumes the observer and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes one event unless a previous write failed.
    fn emit(&mut self, event: &TraceEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, event)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush());
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> RunObserver for JsonLinesObserver<W> {
    fn on_vector(&mut self, index: usize, outcome: &VectorOutcome) {
        self.emit(&TraceEvent::Vector {
            index,
            outcome,
        });
    }

    fn on_complete(&mut self, report: &RunReport) {
        self.emit(&TraceEvent::Complete {
            status: report.status,
            total: report.total,
            passed: report.passed,
            failed: report.failed,
        });
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
