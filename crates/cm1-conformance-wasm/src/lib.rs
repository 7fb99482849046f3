// crates/cm1-conformance-wasm/src/lib.rs
// ============================================================================
// Module: CM-1 WebAssembly Verifier Binding
// Description: Loads a precompiled CM-1 verifier module behind the core trait.
// Purpose: Turn a verifier artifact into a `Verifier` capability.
// Dependencies: cm1-conformance-core, base64, wasmtime
// ============================================================================

//! ## Overview
//! The CM-1 verifier ships as a WebAssembly module exporting a linear memory
//! and a `(offset: i32, length: i32) -> i32` decision function. This crate
//! decodes the artifact (raw or base64 text), compiles and instantiates it
//! with no imports, and exposes it as a
//! [`cm1_conformance_core::Verifier`].
//!
//! Invariants:
//! - A loaded [`WasmVerifier`] always has both exports with the right shape.
//! - Decision traps surface as [`cm1_conformance_core::DecideError::Fault`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifact;
pub mod binding;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifact::ArtifactEncoding;
pub use artifact::DEFAULT_MAX_ARTIFACT_BYTES;
pub use artifact::WASM_MAGIC;
pub use artifact::decode_artifact;
pub use binding::DEFAULT_DECIDE_EXPORT;
pub use binding::DEFAULT_MEMORY_EXPORT;
pub use binding::WasmVerifier;
pub use binding::WasmVerifierOptions;
