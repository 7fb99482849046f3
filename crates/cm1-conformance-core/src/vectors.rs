// crates/cm1-conformance-core/src/vectors.rs
// ============================================================================
// Module: Vector Corpus
// Description: Test vector model and the all-or-nothing corpus loader.
// Purpose: Turn a vector document into typed, immutable conformance cases.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A vector document is a JSON object with an ordered `tests` list. Each entry
//! names a case, states the expected verdict, and optionally carries a `cm1`
//! certificate as an array of byte values.
//!
//! Whether `cm1` is present decides how the case is evaluated, so the loader
//! resolves it once into [`VectorKind`] instead of leaving an `Option` for the
//! evaluator to branch on.
//!
//! Invariants:
//! - Loading either yields the whole corpus or a [`CorpusLoadError`].
//! - `expect` is always [`Verdict::Accept`] or [`Verdict::Reject`].
//! - A present `cm1` (including an empty array) is a certificate; an absent
//!   or `null` `cm1` is a structural vector.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::bounded_read::ReadLimitError;
use crate::bounded_read::read_bytes_with_limit;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum size of a vector document in bytes.
pub const DEFAULT_MAX_CORPUS_BYTES: usize = 8 * 1024 * 1024;
/// Default maximum number of vectors in a corpus.
pub const DEFAULT_MAX_VECTORS: usize = 65_536;
/// Default maximum certificate length in bytes.
pub const DEFAULT_MAX_CERTIFICATE_BYTES: usize = 1024 * 1024;

/// Hard limits applied while loading a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusLimits {
    /// Maximum document size in bytes.
    pub max_bytes: usize,
    /// Maximum number of vectors.
    pub max_vectors: usize,
    /// Maximum certificate length in bytes.
    pub max_certificate_bytes: usize,
}

impl Default for CorpusLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_CORPUS_BYTES,
            max_vectors: DEFAULT_MAX_VECTORS,
            max_certificate_bytes: DEFAULT_MAX_CERTIFICATE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// The two-valued outcome label shared by expectations and verifier answers.
///
/// # Invariants
/// - No third outcome exists; serialized as `"ACCEPT"` or `"REJECT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The certificate is accepted.
    Accept,
    /// The certificate is rejected.
    Reject,
}

impl Verdict {
    /// Returns the stable label for the verdict.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Vector Types
// ============================================================================

/// Opaque CM-1 certificate bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate(Vec<u8>);

impl Certificate {
    /// Wraps raw certificate bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the certificate bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the certificate length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the certificate has no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How a vector is evaluated, resolved from `cm1` presence at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorKind {
    /// The vector carries a certificate for the verifier.
    Certificate(Certificate),
    /// The vector has no certificate; an upstream structural check already
    /// rejected it.
    Structural,
}

/// One named conformance case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// Human-readable identifier used in diagnostics.
    pub name: String,
    /// Expected verdict.
    pub expect: Verdict,
    /// Evaluation path.
    pub kind: VectorKind,
}

impl TestVector {
    /// Builds a certificate-bearing vector.
    #[must_use]
    pub fn certificate(name: impl Into<String>, expect: Verdict, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            expect,
            kind: VectorKind::Certificate(Certificate::new(bytes)),
        }
    }

    /// Builds a structural vector with no certificate.
    #[must_use]
    pub fn structural(name: impl Into<String>, expect: Verdict) -> Self {
        Self {
            name: name.into(),
            expect,
            kind: VectorKind::Structural,
        }
    }

    /// Returns the certificate when the vector carries one.
    #[must_use]
    pub const fn certificate_bytes(&self) -> Option<&Certificate> {
        match &self.kind {
            VectorKind::Certificate(certificate) => Some(certificate),
            VectorKind::Structural => None,
        }
    }
}

// ============================================================================
// SECTION: Document Schema
// ============================================================================

/// Top-level vector document.
#[derive(Debug, Deserialize)]
struct VectorDocument {
    /// Ordered conformance cases.
    tests: Vec<RawVector>,
}

/// Vector entry as it appears on the wire.
#[derive(Debug, Deserialize)]
struct RawVector {
    /// Case name.
    name: String,
    /// Expected verdict label.
    expect: Verdict,
    /// Optional certificate bytes; `null` is treated as absent.
    #[serde(default)]
    cm1: Option<Vec<u8>>,
}

impl From<RawVector> for TestVector {
    fn from(raw: RawVector) -> Self {
        let kind = match raw.cm1 {
            Some(bytes) => VectorKind::Certificate(Certificate::new(bytes)),
            None => VectorKind::Structural,
        };
        Self {
            name: raw.name,
            expect: raw.expect,
            kind,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Corpus loading failures. All are fatal to the run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CorpusLoadError {
    /// The document could not be read.
    #[error("cannot read vector corpus {path}: {error}")]
    Io {
        /// Document path.
        path: String,
        /// Underlying I/O error text.
        error: String,
    },
    /// The document exceeds the size limit.
    #[error("vector corpus is {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The document is not a valid vector document.
    #[error("invalid vector corpus: {0}")]
    Parse(String),
    /// The document holds more vectors than allowed.
    #[error("vector corpus has {count} vectors (limit {limit})")]
    TooManyVectors {
        /// Vector count.
        count: usize,
        /// Allowed limit.
        limit: usize,
    },
    /// A certificate exceeds the per-certificate limit.
    #[error("vector {name} carries a {size}-byte certificate (limit {limit})")]
    CertificateTooLarge {
        /// Vector name.
        name: String,
        /// Certificate size in bytes.
        size: usize,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Corpus
// ============================================================================

/// Ordered, immutable set of test vectors loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorCorpus {
    /// Vectors in document order.
    vectors: Vec<TestVector>,
}

impl VectorCorpus {
    /// Loads a corpus from a JSON document on disk.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusLoadError`] when the file is missing, oversized, or not
    /// a valid vector document.
    pub fn load(path: &Path, limits: &CorpusLimits) -> Result<Self, CorpusLoadError> {
        let bytes = read_bytes_with_limit(path, limits.max_bytes).map_err(|err| match err {
            ReadLimitError::Io(error) => CorpusLoadError::Io {
                path: path.display().to_string(),
                error: error.to_string(),
            },
            ReadLimitError::TooLarge {
                size,
                limit,
            } => CorpusLoadError::TooLarge {
                size,
                limit,
            },
        })?;
        Self::from_json_slice(&bytes, limits)
    }

    /// Parses a corpus from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusLoadError`] when the bytes are not a valid vector
    /// document or exceed a limit.
    pub fn from_json_slice(bytes: &[u8], limits: &CorpusLimits) -> Result<Self, CorpusLoadError> {
        if bytes.len() > limits.max_bytes {
            return Err(CorpusLoadError::TooLarge {
                size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
                limit: limits.max_bytes,
            });
        }
        let document: VectorDocument =
            serde_json::from_slice(bytes).map_err(|err| CorpusLoadError::Parse(err.to_string()))?;
        if document.tests.len() > limits.max_vectors {
            return Err(CorpusLoadError::TooManyVectors {
                count: document.tests.len(),
                limit: limits.max_vectors,
            });
        }
        let vectors: Vec<TestVector> = document.tests.into_iter().map(TestVector::from).collect();
        for vector in &vectors {
            if let Some(certificate) = vector.certificate_bytes()
                && certificate.len() > limits.max_certificate_bytes
            {
                return Err(CorpusLoadError::CertificateTooLarge {
                    name: vector.name.clone(),
                    size: certificate.len(),
                    limit: limits.max_certificate_bytes,
                });
            }
        }
        Ok(Self {
            vectors,
        })
    }

    /// Builds a corpus from already-typed vectors.
    #[must_use]
    pub const fn from_vectors(vectors: Vec<TestVector>) -> Self {
        Self {
            vectors,
        }
    }

    /// Returns the vectors in corpus order.
    #[must_use]
    pub fn vectors(&self) -> &[TestVector] {
        &self.vectors
    }

    /// Returns the number of vectors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns true when the corpus has no vectors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Returns the length of the largest certificate (zero when none).
    #[must_use]
    pub fn max_certificate_len(&self) -> usize {
        self.vectors
            .iter()
            .filter_map(TestVector::certificate_bytes)
            .map(Certificate::len)
            .max()
            .unwrap_or(0)
    }
}
