// crates/cm1-conformance-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing, locale resolution, and overrides.
// Purpose: Ensure CLI flags layer over configuration predictably.
// Dependencies: cm1-conformance-cli main helpers
// ============================================================================

//! ## Overview
//! Validates flag parsing, locale resolution, and config overrides without
//! spawning the binary.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::Parser;
use cm1_conformance_cli::i18n::Locale;
use cm1_conformance_config::ConformanceConfig;
use cm1_conformance_wasm::ArtifactEncoding;

use super::Cli;
use super::FormatArg;
use super::LangArg;
use super::apply_overrides;
use super::resolve_locale;

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn defaults_to_text_without_trace() {
    let cli = Cli::try_parse_from(["cm1-conformance"]).unwrap();
    assert_eq!(cli.format, FormatArg::Text);
    assert!(!cli.trace);
    assert!(!cli.show_version);
    assert!(cli.config.is_none());
}

#[test]
fn rejects_unknown_format() {
    assert!(Cli::try_parse_from(["cm1-conformance", "--format", "yaml"]).is_err());
}

// ============================================================================
// SECTION: Locale Resolution
// ============================================================================

#[test]
fn flag_wins_over_environment() {
    let locale = resolve_locale(Some(LangArg::En), Some("ca")).unwrap();
    assert_eq!(locale, Locale::En);
}

#[test]
fn environment_selects_locale_when_flag_absent() {
    assert_eq!(resolve_locale(None, Some("ca_ES.UTF-8")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn invalid_environment_locale_is_rejected() {
    let err = resolve_locale(None, Some("xx")).err().unwrap();
    assert!(err.to_string().contains("CM1_CONFORMANCE_LANG"));
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

#[test]
fn flags_override_configured_inputs() {
    let cli = Cli::try_parse_from([
        "cm1-conformance",
        "--vectors",
        "suite.json",
        "--verifier",
        "cm1.wasm",
        "--encoding",
        "binary",
    ])
    .unwrap();
    let config = apply_overrides(ConformanceConfig::default(), &cli);
    assert_eq!(config.corpus.path, PathBuf::from("suite.json"));
    assert_eq!(config.verifier.path, PathBuf::from("cm1.wasm"));
    assert_eq!(config.verifier.encoding, ArtifactEncoding::Binary);
}

#[test]
fn absent_flags_keep_configured_inputs() {
    let cli = Cli::try_parse_from(["cm1-conformance", "--format", "json"]).unwrap();
    let config = apply_overrides(ConformanceConfig::default(), &cli);
    assert_eq!(config, ConformanceConfig::default());
    assert_eq!(cli.format, FormatArg::Json);
}
