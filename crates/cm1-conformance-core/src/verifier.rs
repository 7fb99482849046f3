// crates/cm1-conformance-core/src/verifier.rs
// ============================================================================
// Module: Verifier Capability
// Description: Binding-agnostic contract for the external CM-1 verifier.
// Purpose: Expose a shared byte arena and a decision call to the evaluator.
// Dependencies: crate::vectors, thiserror
// ============================================================================

//! ## Overview
//! The CM-1 verifier is an external black box. The harness only needs two
//! capabilities from it: a writable byte arena and a decision call over a
//! sub-range of that arena. [`Verifier`] captures exactly that, so a
//! WebAssembly module, a native library, or an in-process closure can all sit
//! behind the same seam.
//!
//! Invariants:
//! - Arena content before a call is whatever the caller staged; it is
//!   otherwise unspecified between calls.
//! - A raw answer of [`ACCEPT_SENTINEL`] means accept; anything else rejects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::vectors::Verdict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Raw decision value that maps to [`Verdict::Accept`].
pub const ACCEPT_SENTINEL: i32 = 1;

impl Verdict {
    /// Maps a raw decision value onto the verdict space.
    ///
    /// Unrecognized values reject.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        if raw == ACCEPT_SENTINEL { Self::Accept } else { Self::Reject }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Verifier load failures. All are fatal to the run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum VerifierLoadError {
    /// The artifact could not be read.
    #[error("cannot read verifier artifact {path}: {error}")]
    Io {
        /// Artifact path.
        path: String,
        /// Underlying I/O error text.
        error: String,
    },
    /// The artifact exceeds the size limit.
    #[error("verifier artifact is {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The artifact text encoding could not be decoded.
    #[error("cannot decode verifier artifact: {0}")]
    Decode(String),
    /// The artifact is not a valid module.
    #[error("cannot compile verifier module: {0}")]
    Compile(String),
    /// The module could not be instantiated.
    #[error("cannot instantiate verifier module: {0}")]
    Instantiate(String),
    /// A required export is missing or has the wrong shape.
    #[error("verifier module does not export {kind} `{name}`")]
    MissingExport {
        /// Export name.
        name: String,
        /// Expected export kind.
        kind: &'static str,
    },
    /// The arena cannot hold the largest certificate in the corpus.
    #[error("verifier buffer holds {available} bytes but the corpus needs {required}")]
    InsufficientCapacity {
        /// Bytes needed by the largest certificate.
        required: usize,
        /// Bytes exposed by the verifier.
        available: usize,
    },
}

/// Failures raised by a single decision call.
#[derive(Debug, Error)]
pub enum DecideError {
    /// The requested range falls outside the arena.
    #[error("decision range {offset}+{length} exceeds the {capacity}-byte buffer")]
    OutOfRange {
        /// Range start.
        offset: usize,
        /// Range length.
        length: usize,
        /// Arena size.
        capacity: usize,
    },
    /// The verifier faulted while deciding.
    #[error("verifier faulted: {0}")]
    Fault(String),
}

// ============================================================================
// SECTION: Verifier Trait
// ============================================================================

/// Opaque accept/reject capability over a shared byte arena.
///
/// One instance lives for the whole run. Calls are strictly sequential; the
/// caller stages bytes through [`Verifier::buffer_mut`] and then calls
/// [`Verifier::decide`] over the staged range.
pub trait Verifier {
    /// Returns the current arena size in bytes.
    fn capacity(&self) -> usize;

    /// Returns the arena for staging certificate bytes.
    fn buffer_mut(&mut self) -> &mut [u8];

    /// Decides over `length` bytes at `offset`, returning the raw answer.
    ///
    /// # Errors
    ///
    /// Returns [`DecideError`] when the range is invalid or the verifier faults.
    fn decide(&mut self, offset: usize, length: usize) -> Result<i32, DecideError>;
}

impl<V: Verifier + ?Sized> Verifier for &mut V {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn buffer_mut(&mut self) -> &mut [u8] {
        (**self).buffer_mut()
    }

    fn decide(&mut self, offset: usize, length: usize) -> Result<i32, DecideError> {
        (**self).decide(offset, length)
    }
}

// ============================================================================
// SECTION: In-Memory Verifier
// ============================================================================

/// Verifier backed by a fixed-capacity host arena and a decision closure.
///
/// Useful for embedding a native decision routine and for exercising the
/// harness without a compiled module.
pub struct InMemoryVerifier<F> {
    /// Fixed-capacity staging arena.
    arena: Vec<u8>,
    /// Decision routine over the requested sub-range.
    decide: F,
    /// Number of decision calls made so far.
    calls: usize,
}

impl<F> InMemoryVerifier<F>
where
    F: FnMut(&[u8]) -> i32,
{
    /// Creates a verifier with a zeroed arena of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize, decide: F) -> Self {
        Self {
            arena: vec![0; capacity],
            decide,
            calls: 0,
        }
    }

    /// Returns how many decision calls have been made.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }
}

impl<F> Verifier for InMemoryVerifier<F>
where
    F: FnMut(&[u8]) -> i32,
{
    fn capacity(&self) -> usize {
        self.arena.len()
    }

    fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.arena
    }

    fn decide(&mut self, offset: usize, length: usize) -> Result<i32, DecideError> {
        self.calls = self.calls.saturating_add(1);
        let capacity = self.arena.len();
        let range = offset
            .checked_add(length)
            .and_then(|end| self.arena.get(offset .. end))
            .ok_or(DecideError::OutOfRange {
                offset,
                length,
                capacity,
            })?;
        Ok((self.decide)(range))
    }
}
