// crates/cm1-conformance-wasm/src/binding.rs
// ============================================================================
// Module: WebAssembly Verifier
// Description: wasmtime-backed implementation of the verifier capability.
// Purpose: Compile, instantiate, and call the CM-1 decision module.
// Dependencies: cm1-conformance-core, wasmtime
// ============================================================================

//! ## Overview
//! [`WasmVerifier`] owns a wasmtime store holding one instance of the
//! verifier module. The module's exported linear memory is the staging arena
//! and its decision export is called with `(offset, length)`.
//!
//! The module is instantiated with no imports; a module that needs host
//! functions fails to load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use cm1_conformance_core::DecideError;
use cm1_conformance_core::ReadLimitError;
use cm1_conformance_core::Verifier;
use cm1_conformance_core::VerifierLoadError;
use cm1_conformance_core::read_bytes_with_limit;
use wasmtime::Engine;
use wasmtime::Instance;
use wasmtime::Memory;
use wasmtime::Module;
use wasmtime::Store;
use wasmtime::TypedFunc;

use crate::artifact::ArtifactEncoding;
use crate::artifact::DEFAULT_MAX_ARTIFACT_BYTES;
use crate::artifact::decode_artifact;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default name of the exported linear memory.
pub const DEFAULT_MEMORY_EXPORT: &str = "memory";
/// Default name of the exported decision function.
pub const DEFAULT_DECIDE_EXPORT: &str = "verify";
/// Export kind label for the decision function.
const DECIDE_EXPORT_KIND: &str = "function (i32, i32) -> i32";
/// Export kind label for the memory.
const MEMORY_EXPORT_KIND: &str = "memory";

// ============================================================================
// SECTION: Options
// ============================================================================

/// Load options for a WebAssembly verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasmVerifierOptions {
    /// Artifact encoding on disk.
    pub encoding: ArtifactEncoding,
    /// Exported memory name.
    pub memory_export: String,
    /// Exported decision function name.
    pub decide_export: String,
    /// Maximum artifact size in bytes.
    pub max_artifact_bytes: usize,
}

impl Default for WasmVerifierOptions {
    fn default() -> Self {
        Self {
            encoding: ArtifactEncoding::Auto,
            memory_export: DEFAULT_MEMORY_EXPORT.to_string(),
            decide_export: DEFAULT_DECIDE_EXPORT.to_string(),
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// CM-1 verifier instantiated from a WebAssembly module.
pub struct WasmVerifier {
    /// Store owning the instance state.
    store: Store<()>,
    /// Exported linear memory used as the staging arena.
    memory: Memory,
    /// Exported decision function.
    decide: TypedFunc<(i32, i32), i32>,
}

impl WasmVerifier {
    /// Loads a verifier artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierLoadError`] when the artifact is missing, oversized,
    /// undecodable, invalid, or lacks the required exports.
    pub fn load(path: &Path, options: &WasmVerifierOptions) -> Result<Self, VerifierLoadError> {
        let bytes =
            read_bytes_with_limit(path, options.max_artifact_bytes).map_err(|err| match err {
                ReadLimitError::Io(error) => VerifierLoadError::Io {
                    path: path.display().to_string(),
                    error: error.to_string(),
                },
                ReadLimitError::TooLarge {
                    size,
                    limit,
                } => VerifierLoadError::TooLarge {
                    size,
                    limit,
                },
            })?;
        Self::from_artifact_bytes(&bytes, options)
    }

    /// Decodes artifact bytes and instantiates the module.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierLoadError`] when decoding, compilation, instantiation,
    /// or export lookup fails.
    pub fn from_artifact_bytes(
        bytes: &[u8],
        options: &WasmVerifierOptions,
    ) -> Result<Self, VerifierLoadError> {
        let module_bytes = decode_artifact(bytes, options.encoding)?;
        Self::from_module_bytes(&module_bytes, options)
    }

    /// Instantiates a verifier from WebAssembly binary bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierLoadError`] when compilation, instantiation, or export
    /// lookup fails.
    pub fn from_module_bytes(
        module_bytes: &[u8],
        options: &WasmVerifierOptions,
    ) -> Result<Self, VerifierLoadError> {
        let engine = Engine::default();
        let module = Module::from_binary(&engine, module_bytes)
            .map_err(|err| VerifierLoadError::Compile(format!("{err:#}")))?;
        let mut store = Store::new(&engine, ());
        let instance = Instance::new(&mut store, &module, &[])
            .map_err(|err| VerifierLoadError::Instantiate(format!("{err:#}")))?;
        let memory = instance.get_memory(&mut store, &options.memory_export).ok_or_else(|| {
            VerifierLoadError::MissingExport {
                name: options.memory_export.clone(),
                kind: MEMORY_EXPORT_KIND,
            }
        })?;
        let decide = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, &options.decide_export)
            .map_err(|_| VerifierLoadError::MissingExport {
                name: options.decide_export.clone(),
                kind: DECIDE_EXPORT_KIND,
            })?;
        Ok(Self {
            store,
            memory,
            decide,
        })
    }
}

impl Verifier for WasmVerifier {
    fn capacity(&self) -> usize {
        self.memory.data_size(&self.store)
    }

    fn buffer_mut(&mut self) -> &mut [u8] {
        self.memory.data_mut(&mut self.store)
    }

    fn decide(&mut self, offset: usize, length: usize) -> Result<i32, DecideError> {
        let out_of_range = || DecideError::OutOfRange {
            offset,
            length,
            capacity: self.memory.data_size(&self.store),
        };
        let wasm_offset = i32::try_from(offset).map_err(|_| out_of_range())?;
        let wasm_length = i32::try_from(length).map_err(|_| out_of_range())?;
        self.decide
            .call(&mut self.store, (wasm_offset, wasm_length))
            .map_err(|err| DecideError::Fault(format!("{err:#}")))
    }
}
