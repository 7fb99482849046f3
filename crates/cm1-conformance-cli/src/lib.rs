// crates/cm1-conformance-cli/src/lib.rs
// ============================================================================
// Module: CM-1 Conformance CLI Library
// Description: Shared helpers for the conformance CLI binary.
// Purpose: Expose i18n and report rendering for the binary and its tests.
// Dependencies: cm1-conformance-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The `cm1-conformance` binary keeps its user-facing strings in the
//! [`i18n`] catalog and its report rendering in [`output`], so both can be
//! tested without spawning the binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;
pub mod output;
