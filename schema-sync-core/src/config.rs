use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::index::{ExportNaming, IndexOrder};

/// Everything a synchronisation run needs. Every field has a default, so an
/// empty YAML document is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Repository root; relative directories below resolve against it.
    pub root: PathBuf,
    /// Nested checkout holding the schema sources.
    pub schema_dir: PathBuf,
    /// Tool-owned directory for generated bindings, recreated every run.
    pub output_dir: PathBuf,
    pub generator: GeneratorConfig,
    pub repository: RepositoryConfig,
    pub index: IndexConfig,
    pub policy: PhasePolicy,
    pub skip_bootstrap: bool,
    pub skip_refresh: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            schema_dir: PathBuf::from("schemas"),
            output_dir: PathBuf::from("src/schemas"),
            generator: GeneratorConfig::default(),
            repository: RepositoryConfig::default(),
            index: IndexConfig::default(),
            policy: PhasePolicy::default(),
            skip_bootstrap: false,
            skip_refresh: false,
        }
    }
}

impl SyncConfig {
    pub fn schema_path(&self) -> PathBuf {
        resolve(&self.root, &self.schema_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        resolve(&self.root, &self.output_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_path().join(&self.index.file_name)
    }

    pub fn trace_loaded(&self) {
        info!(
            root = %self.root.display(),
            schema_dir = %self.schema_dir.display(),
            output_dir = %self.output_dir.display(),
            generator = %self.generator.program,
            language = %self.generator.language,
            branch = %self.repository.branch,
            "Loaded SyncConfig"
        );
        debug!(?self, "SyncConfig loaded (full debug)");
    }
}

fn resolve(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

/// The external schema compiler and how to obtain it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub program: String,
    /// Target-language token passed as the compiler's first argument.
    pub language: String,
    /// Extension of the files the compiler emits, without the dot.
    pub extension: String,
    /// Git URL handed to `cargo install --git` when the probe fails.
    pub install_source: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "packetc".to_string(),
            language: "ts".to_string(),
            extension: "ts".to_string(),
            install_source: "https://github.com/EverCrawl/packetc.git".to_string(),
        }
    }
}

/// Upstream tracking for the schema checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub remote: String,
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "master".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub file_name: String,
    pub naming: ExportNaming,
    pub order: IndexOrder,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file_name: "index.ts".to_string(),
            naming: ExportNaming::default(),
            order: IndexOrder::default(),
        }
    }
}

/// What a best-effort phase does when it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    #[default]
    Continue,
    Abort,
}

/// Per-phase failure policy. Filesystem phases always abort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasePolicy {
    pub bootstrap: OnError,
    pub refresh: OnError,
    pub compile: OnError,
}
