// crates/cm1-conformance-config/src/config.rs
// ============================================================================
// Module: CM-1 Conformance Configuration
// Description: Configuration loading and validation for the harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: cm1-conformance-core, cm1-conformance-wasm, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file is optional only when it was not asked for: an explicit path or
//! the environment override must exist, while a missing default file yields
//! the built-in defaults. Relative paths inside a file resolve against the
//! file's directory so the harness behaves the same from any working
//! directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use cm1_conformance_core::CorpusLimits;
use cm1_conformance_core::vectors::DEFAULT_MAX_CERTIFICATE_BYTES;
use cm1_conformance_core::vectors::DEFAULT_MAX_CORPUS_BYTES;
use cm1_conformance_core::vectors::DEFAULT_MAX_VECTORS;
use cm1_conformance_wasm::ArtifactEncoding;
use cm1_conformance_wasm::DEFAULT_DECIDE_EXPORT;
use cm1_conformance_wasm::DEFAULT_MAX_ARTIFACT_BYTES;
use cm1_conformance_wasm::DEFAULT_MEMORY_EXPORT;
use cm1_conformance_wasm::WasmVerifierOptions;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "cm1-conformance.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CM1_CONFORMANCE_CONFIG";
/// Default vector document path.
pub const DEFAULT_CORPUS_PATH: &str = "vectors/collapse.geometry.conformance.json";
/// Default verifier artifact path.
pub const DEFAULT_VERIFIER_PATH: &str = "wasm/cm1_verify.wasm.txt";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a module export name.
pub(crate) const MAX_EXPORT_NAME_LENGTH: usize = 256;
/// Upper bound for `corpus.max_bytes`.
pub(crate) const MAX_CORPUS_BYTES_CEILING: usize = 256 * 1024 * 1024;
/// Upper bound for `corpus.max_vectors`.
pub(crate) const MAX_VECTORS_CEILING: usize = 1_000_000;
/// Upper bound for `corpus.max_certificate_bytes`.
pub(crate) const MAX_CERTIFICATE_BYTES_CEILING: usize = 64 * 1024 * 1024;
/// Upper bound for `verifier.max_artifact_bytes`.
pub(crate) const MAX_ARTIFACT_BYTES_CEILING: usize = 256 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// CM-1 conformance harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConformanceConfig {
    /// Vector corpus configuration.
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Verifier artifact configuration.
    #[serde(default)]
    pub verifier: VerifierConfig,
    /// Path of the file this config was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Vector corpus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Vector document path.
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// Maximum document size in bytes.
    #[serde(default = "default_max_corpus_bytes")]
    pub max_bytes: usize,
    /// Maximum number of vectors.
    #[serde(default = "default_max_vectors")]
    pub max_vectors: usize,
    /// Maximum certificate length in bytes.
    #[serde(default = "default_max_certificate_bytes")]
    pub max_certificate_bytes: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            max_bytes: default_max_corpus_bytes(),
            max_vectors: default_max_vectors(),
            max_certificate_bytes: default_max_certificate_bytes(),
        }
    }
}

impl CorpusConfig {
    /// Returns the loader limits for this configuration.
    #[must_use]
    pub const fn limits(&self) -> CorpusLimits {
        CorpusLimits {
            max_bytes: self.max_bytes,
            max_vectors: self.max_vectors,
            max_certificate_bytes: self.max_certificate_bytes,
        }
    }

    /// Validates corpus settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("corpus.path", &self.path.to_string_lossy())?;
        validate_limit("corpus.max_bytes", self.max_bytes, MAX_CORPUS_BYTES_CEILING)?;
        validate_limit("corpus.max_vectors", self.max_vectors, MAX_VECTORS_CEILING)?;
        validate_limit(
            "corpus.max_certificate_bytes",
            self.max_certificate_bytes,
            MAX_CERTIFICATE_BYTES_CEILING,
        )
    }
}

/// Verifier artifact configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    /// Verifier artifact path.
    #[serde(default = "default_verifier_path")]
    pub path: PathBuf,
    /// Artifact encoding.
    #[serde(default)]
    pub encoding: ArtifactEncoding,
    /// Exported memory name.
    #[serde(default = "default_memory_export")]
    pub memory_export: String,
    /// Exported decision function name.
    #[serde(default = "default_decide_export")]
    pub decide_export: String,
    /// Maximum artifact size in bytes.
    #[serde(default = "default_max_artifact_bytes")]
    pub max_artifact_bytes: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            path: default_verifier_path(),
            encoding: ArtifactEncoding::default(),
            memory_export: default_memory_export(),
            decide_export: default_decide_export(),
            max_artifact_bytes: default_max_artifact_bytes(),
        }
    }
}

impl VerifierConfig {
    /// Returns binding options for this configuration.
    #[must_use]
    pub fn options(&self) -> WasmVerifierOptions {
        WasmVerifierOptions {
            encoding: self.encoding,
            memory_export: self.memory_export.clone(),
            decide_export: self.decide_export.clone(),
            max_artifact_bytes: self.max_artifact_bytes,
        }
    }

    /// Validates verifier settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("verifier.path", &self.path.to_string_lossy())?;
        validate_export_name("verifier.memory_export", &self.memory_export)?;
        validate_export_name("verifier.decide_export", &self.decide_export)?;
        validate_limit(
            "verifier.max_artifact_bytes",
            self.max_artifact_bytes,
            MAX_ARTIFACT_BYTES_CEILING,
        )
    }
}

impl ConformanceConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = resolve_path(path)?;
        Self::load_from(&source)
    }

    /// Loads configuration from an already-resolved source.
    fn load_from(source: &ConfigSource) -> Result<Self, ConfigError> {
        let path = match source {
            ConfigSource::Explicit(path) => path,
            ConfigSource::Default(path) => {
                if !path.exists() {
                    let config = Self::default();
                    config.validate()?;
                    return Ok(config);
                }
                path
            }
        };
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        if let Some(base) = path.parent() {
            config.corpus.path = resolve_relative(base, &config.corpus.path);
            config.verifier.path = resolve_relative(base, &config.verifier.path);
        }
        config.source = Some(path.clone());
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.corpus.validate()?;
        self.verifier.validate()
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default vector document path.
fn default_corpus_path() -> PathBuf {
    PathBuf::from(DEFAULT_CORPUS_PATH)
}

/// Default verifier artifact path.
fn default_verifier_path() -> PathBuf {
    PathBuf::from(DEFAULT_VERIFIER_PATH)
}

/// Default maximum document size.
const fn default_max_corpus_bytes() -> usize {
    DEFAULT_MAX_CORPUS_BYTES
}

/// Default maximum vector count.
const fn default_max_vectors() -> usize {
    DEFAULT_MAX_VECTORS
}

/// Default maximum certificate length.
const fn default_max_certificate_bytes() -> usize {
    DEFAULT_MAX_CERTIFICATE_BYTES
}

/// Default maximum artifact size.
const fn default_max_artifact_bytes() -> usize {
    DEFAULT_MAX_ARTIFACT_BYTES
}

/// Default memory export name.
fn default_memory_export() -> String {
    DEFAULT_MEMORY_EXPORT.to_string()
}

/// Default decision export name.
fn default_decide_export() -> String {
    DEFAULT_DECIDE_EXPORT.to_string()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Where the config path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Named on the command line or via the environment; must exist.
    Explicit(PathBuf),
    /// The default filename; may be absent.
    Default(PathBuf),
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = path {
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::Explicit(PathBuf::from(env_path)));
    }
    Ok(ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a module export name.
fn validate_export_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_EXPORT_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a size or count limit lies in `1 ..= ceiling`.
fn validate_limit(field: &str, value: usize, ceiling: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if value > ceiling {
        return Err(ConfigError::Invalid(format!("{field} must be at most {ceiling}")));
    }
    Ok(())
}

/// Joins a relative path onto `base`; absolute paths are kept as-is.
fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
