//! Pipeline context shared by all integration stages.
//!
//! The [`PipelineContext`] bundles the run configuration
//! ([`IntegrationOptions`]) with the [`ModalityRegistry`]. It is built once
//! at startup and passed by reference to every stage; stages never mutate it.

use std::path::{Path, PathBuf};

use crate::registry::ModalityRegistry;

/// Seed used for subsampling and synthesis unless overridden.
pub const DEFAULT_ALIGNMENT_SEED: u64 = 42;

/// Name of the output directory created under the base path by default.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationOptions {
    /// Root against which modality candidate locations are resolved.
    pub base_path: PathBuf,
    /// Directory receiving the fused table and report artifacts.
    pub output_dir: PathBuf,
    /// Seed for every randomized operation.
    pub seed: u64,
    /// Run all stages but skip writing artifacts.
    pub dry_run: bool,
}

impl IntegrationOptions {
    /// Creates options rooted at `base_path` with default output directory and seed.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        let output_dir = base_path.join(DEFAULT_OUTPUT_DIR);
        Self {
            base_path,
            output_dir,
            seed: DEFAULT_ALIGNMENT_SEED,
            dry_run: false,
        }
    }

    /// Overrides the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Overrides the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for IntegrationOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Immutable context for one integration run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub options: IntegrationOptions,
    pub registry: ModalityRegistry,
}

impl PipelineContext {
    /// Creates a context with the default modality registry.
    pub fn new(options: IntegrationOptions) -> Self {
        Self {
            options,
            registry: ModalityRegistry::default(),
        }
    }

    /// Sets the modality registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ModalityRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Base path for candidate lookup.
    pub fn base_path(&self) -> &Path {
        &self.options.base_path
    }

    /// Seed for subsampling.
    pub fn alignment_seed(&self) -> u64 {
        self.options.seed
    }

    /// Seed for synthesizing the named modality.
    ///
    /// Offset by declaration position so that two synthesized modalities
    /// never share a random stream.
    pub fn synthesis_seed(&self, modality: &str) -> u64 {
        let offset = self.registry.position(modality).unwrap_or(0) as u64;
        self.options.seed.wrapping_add(offset)
    }
}
