//! `load_config` module: reads an optional YAML file into the core
//! [`SyncConfig`].
//!
//! Every key is optional; missing keys keep their built-in defaults, so an
//! empty file is a valid config.
//!
//! # Errors
//! All errors use `anyhow::Error` and name the offending path; they surface
//! at the CLI boundary.
//!
//! Example:
//!
//! ```yaml
//! schema_dir: schemas
//! output_dir: src/schemas
//! generator:
//!   program: packetc
//!   language: ts
//! repository:
//!   branch: master
//! policy:
//!   compile: abort
//! ```
use anyhow::Result;
use schema_sync_core::config::SyncConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file empty, using defaults");
        return Ok(SyncConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!(
                "Failed to parse config YAML {:?}: {e}",
                path_ref
            ))
        }
    }
}
