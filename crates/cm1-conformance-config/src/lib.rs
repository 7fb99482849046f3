// crates/cm1-conformance-config/src/lib.rs
// ============================================================================
// Module: CM-1 Conformance Config Library
// Description: Canonical config model and validation for the harness.
// Purpose: Single source of truth for cm1-conformance.toml semantics.
// Dependencies: cm1-conformance-core, cm1-conformance-wasm, serde, toml
// ============================================================================

//! ## Overview
//! `cm1-conformance-config` defines where the harness finds its vector corpus
//! and verifier artifact, and the limits applied while loading them. Loading
//! is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
