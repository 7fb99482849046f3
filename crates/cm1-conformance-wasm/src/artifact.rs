// crates/cm1-conformance-wasm/src/artifact.rs
// ============================================================================
// Module: Verifier Artifact Decoding
// Description: Decodes raw or base64-wrapped verifier modules.
// Purpose: Accept both `.wasm` binaries and `.wasm.txt` text artifacts.
// Dependencies: base64, cm1-conformance-core, serde
// ============================================================================

//! ## Overview
//! The verifier module is commonly distributed as base64 text so it can live
//! next to the vectors in a text-only repository. [`decode_artifact`] turns
//! either form into module bytes; `Auto` picks the form by checking for the
//! WebAssembly magic header.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use cm1_conformance_core::VerifierLoadError;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// WebAssembly binary magic header.
pub const WASM_MAGIC: [u8; 4] = *b"\0asm";
/// Default maximum artifact size in bytes.
pub const DEFAULT_MAX_ARTIFACT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Encoding
// ============================================================================

/// On-disk encoding of a verifier artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactEncoding {
    /// Binary when the magic header is present, base64 text otherwise.
    #[default]
    Auto,
    /// Raw WebAssembly binary.
    Binary,
    /// Base64 text, whitespace tolerated.
    Base64,
}

/// Decodes artifact bytes into WebAssembly module bytes.
///
/// # Errors
///
/// Returns [`VerifierLoadError::Decode`] when base64 text is not valid UTF-8
/// or not valid base64.
pub fn decode_artifact(
    bytes: &[u8],
    encoding: ArtifactEncoding,
) -> Result<Cow<'_, [u8]>, VerifierLoadError> {
    match encoding {
        ArtifactEncoding::Binary => Ok(Cow::Borrowed(bytes)),
        ArtifactEncoding::Base64 => decode_base64(bytes).map(Cow::Owned),
        ArtifactEncoding::Auto if bytes.starts_with(&WASM_MAGIC) => Ok(Cow::Borrowed(bytes)),
        ArtifactEncoding::Auto => decode_base64(bytes).map(Cow::Owned),
    }
}

/// Decodes base64 text, ignoring ASCII whitespace such as line wrapping.
fn decode_base64(bytes: &[u8]) -> Result<Vec<u8>, VerifierLoadError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| VerifierLoadError::Decode("base64 artifact must be utf-8".to_string()))?;
    let compact: String = text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
    BASE64.decode(compact.as_bytes()).map_err(|err| VerifierLoadError::Decode(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
