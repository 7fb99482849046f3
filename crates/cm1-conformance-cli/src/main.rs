// crates/cm1-conformance-cli/src/main.rs
// ============================================================================
// Module: CM-1 Conformance CLI Entry Point
// Description: Runs the conformance corpus against a CM-1 verifier module.
// Purpose: Provide a localized, CI-friendly pass/fail gate with exit codes.
// Dependencies: clap, cm1-conformance-{config,core,wasm}, serde_json, thiserror, tokio.
// ============================================================================

//! ## Overview
//! `cm1-conformance` loads the vector corpus and the verifier artifact,
//! evaluates every vector in corpus order, and reports the result.
//!
//! Exit codes:
//! - `0` every vector passed.
//! - `1` at least one vector failed.
//! - `2` the run could not be set up or its result could not be written.
//!
//! Inputs are untrusted: the config, corpus, and artifact are all read with
//! size limits and rejected on the first malformed field.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use cm1_conformance_cli::i18n::Locale;
use cm1_conformance_cli::i18n::set_locale;
use cm1_conformance_cli::output::JsonLinesObserver;
use cm1_conformance_cli::output::render_json;
use cm1_conformance_cli::output::render_text;
use cm1_conformance_cli::t;
use cm1_conformance_config::ConformanceConfig;
use cm1_conformance_core::ConformanceHarness;
use cm1_conformance_core::NoopObserver;
use cm1_conformance_core::RunObserver;
use cm1_conformance_core::RunReport;
use cm1_conformance_core::VectorCorpus;
use cm1_conformance_wasm::ArtifactEncoding;
use cm1_conformance_wasm::WasmVerifier;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "CM1_CONFORMANCE_LANG";
/// Exit code for a run with at least one failing vector.
const EXIT_MISMATCH: u8 = 1;
/// Exit code for setup and output failures.
const EXIT_SETUP_FAILURE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "cm1-conformance", disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Preferred output language (overrides `CM1_CONFORMANCE_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Path to the TOML config file (overrides `CM1_CONFORMANCE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Path to the vector corpus JSON file.
    #[arg(long, value_name = "PATH")]
    vectors: Option<PathBuf>,
    /// Path to the verifier artifact.
    #[arg(long, value_name = "PATH")]
    verifier: Option<PathBuf>,
    /// Verifier artifact encoding.
    #[arg(long, value_enum, value_name = "ENCODING")]
    encoding: Option<EncodingArg>,
    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
    /// Write one JSON trace event per vector to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Verifier artifact encodings.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum EncodingArg {
    /// Sniff the WebAssembly magic number.
    Auto,
    /// Raw WebAssembly binary.
    Binary,
    /// Base64 text.
    Base64,
}

/// Report formats.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum FormatArg {
    /// Human-readable summary lines.
    Text,
    /// Full run report as JSON.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Localized CLI failure.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and drives one conformance run.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = ConformanceConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let config = apply_overrides(config, &cli);

    let (corpus, verifier) = load_inputs(&config).await?;
    let harness = ConformanceHarness::new(corpus, verifier).map_err(|err| {
        CliError::new(t!(
            "verifier.load_failed",
            path = config.verifier.path.display(),
            error = err
        ))
    })?;

    let report = if cli.trace {
        let (report, mut observer) =
            evaluate(harness, JsonLinesObserver::new(std::io::stderr())).await?;
        if let Some(err) = observer.take_error() {
            write_stderr_line(&t!("trace.write_failed", error = err))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        }
        report
    } else {
        evaluate(harness, NoopObserver).await?.0
    };

    emit_report(&report, cli.format)?;
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_MISMATCH))
    }
}

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: ConformanceConfig, cli: &Cli) -> ConformanceConfig {
    if let Some(path) = &cli.vectors {
        config.corpus.path.clone_from(path);
    }
    if let Some(path) = &cli.verifier {
        config.verifier.path.clone_from(path);
    }
    if let Some(encoding) = cli.encoding {
        config.verifier.encoding = encoding.into();
    }
    config
}

/// Loads the corpus and the verifier concurrently on the blocking pool.
async fn load_inputs(config: &ConformanceConfig) -> CliResult<(VectorCorpus, WasmVerifier)> {
    let corpus_path = config.corpus.path.clone();
    let limits = config.corpus.limits();
    let corpus_task = tokio::task::spawn_blocking(move || {
        VectorCorpus::load(&corpus_path, &limits).map_err(|err| {
            CliError::new(t!("corpus.load_failed", path = corpus_path.display(), error = err))
        })
    });

    let verifier_path = config.verifier.path.clone();
    let options = config.verifier.options();
    let verifier_task = tokio::task::spawn_blocking(move || {
        WasmVerifier::load(&verifier_path, &options).map_err(|err| {
            CliError::new(t!("verifier.load_failed", path = verifier_path.display(), error = err))
        })
    });

    let (corpus, verifier) = tokio::join!(corpus_task, verifier_task);
    let corpus = corpus.map_err(|err| CliError::new(t!("setup.task_failed", error = err)))??;
    let verifier = verifier.map_err(|err| CliError::new(t!("setup.task_failed", error = err)))??;
    Ok((corpus, verifier))
}

/// Runs the harness on the blocking pool and hands the observer back.
async fn evaluate<O>(
    mut harness: ConformanceHarness<WasmVerifier>,
    mut observer: O,
) -> CliResult<(RunReport, O)>
where
    O: RunObserver + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let report = harness.run(&mut observer);
        (report, observer)
    })
    .await
    .map_err(|err| CliError::new(t!("setup.task_failed", error = err)))
}

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

impl From<EncodingArg> for ArtifactEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Auto => Self::Auto,
            EncodingArg::Binary => Self::Binary,
            EncodingArg::Base64 => Self::Base64,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes the run report in the selected format.
fn emit_report(report: &RunReport, format: FormatArg) -> CliResult<()> {
    match format {
        FormatArg::Text => {
            let summary = render_text(report);
            for line in &summary.stderr {
                write_stderr_line(line)
                    .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            }
            for line in &summary.stdout {
                write_stdout_line(line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        FormatArg::Json => {
            let document = render_json(report)
                .map_err(|err| CliError::new(t!("report.serialize_failed", error = err)))?;
            write_stdout_line(&document)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the setup failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_SETUP_FAILURE)
}
