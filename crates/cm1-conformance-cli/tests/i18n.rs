// crates/cm1-conformance-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: cm1-conformance-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the conformance CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](cm1_conformance_cli::t) macro formats placeholders correctly.

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

use cm1_conformance_cli::i18n::Locale;
use cm1_conformance_cli::i18n::MessageArg;
use cm1_conformance_cli::i18n::translate;
use cm1_conformance_cli::i18n::translate_in;
use cm1_conformance_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("name", "v4");
    assert_eq!(arg.key, "name");
    assert_eq!(arg.value, "v4");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let result = translate("run.vector_failed", vec![MessageArg::new("name", "v4")]);
    assert_eq!(result, "FAIL: v4");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

/// Confirms the macro formats named arguments.
#[test]
fn macro_formats_named_arguments() {
    let failed = 3;
    assert_eq!(t!("run.failed", failed = failed), "❌ CONFORMANCE FAILED (3 failures)");
    assert_eq!(t!("run.passed", passed = 7), "✅ CONFORMANCE PASSED (7 tests)");
}

/// Failure lines stay identical across locales.
#[test]
fn failure_line_is_locale_independent() {
    let en = translate_in(Locale::En, "run.vector_failed", vec![MessageArg::new("name", "v2")]);
    let ca = translate_in(Locale::Ca, "run.vector_failed", vec![MessageArg::new("name", "v2")]);
    assert_eq!(en, ca);
}

/// Catalan summaries differ from English ones.
#[test]
fn catalan_summary_is_translated() {
    let ca = translate_in(Locale::Ca, "run.passed", vec![MessageArg::new("passed", "2")]);
    assert_eq!(ca, "✅ CONFORMITAT SUPERADA (2 proves)");
}
