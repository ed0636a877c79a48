//! High-level pipeline: bootstrap → refresh → clean → compile → index.
//!
//! # Major Types
//! - [`Phase`]: the five steps of a run, in execution order
//! - [`SyncReport`]: per-phase outcome plus the index that was written
//!
//! # Error Handling
//! The subprocess phases (bootstrap, refresh, compile) are best effort: their
//! failures are recorded in the report and the run continues, unless the
//! [`PhasePolicy`](crate::config::PhasePolicy) says to abort. The filesystem
//! phases (clean, index) abort on any error.
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{OnError, SyncConfig};
use crate::contract::CommandRunner;
use crate::error::SyncError;
use crate::{generate, index, repository, toolchain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Bootstrap,
    Refresh,
    Clean,
    Compile,
    Index,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Bootstrap => "bootstrap",
            Phase::Refresh => "refresh",
            Phase::Clean => "clean",
            Phase::Compile => "compile",
            Phase::Index => "index",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub phases: Vec<PhaseReport>,
    pub index_path: PathBuf,
    pub exports: Vec<String>,
}

impl SyncReport {
    pub fn failed_phases(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .filter(|p| p.status == PhaseStatus::Failed)
            .map(|p| p.phase)
            .collect()
    }

    pub fn status_of(&self, phase: Phase) -> Option<PhaseStatus> {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map(|p| p.status)
    }
}

pub async fn synchronise<R>(config: &SyncConfig, runner: &R) -> Result<SyncReport, SyncError>
where
    R: CommandRunner + ?Sized,
{
    info!("[SYNC] Starting schema synchronisation");
    let mut phases = Vec::with_capacity(5);

    // --- Bootstrap ---
    let status = if config.skip_bootstrap {
        PhaseStatus::Skipped
    } else {
        info!(program = %config.generator.program, "[SYNC] Checking for generator");
        toolchain::ensure_generator(runner, &config.generator).await
    };
    record(&mut phases, Phase::Bootstrap, status, config.policy.bootstrap)?;

    // --- Refresh ---
    let status = if config.skip_refresh {
        PhaseStatus::Skipped
    } else {
        info!(schema_dir = %config.schema_path().display(), "[SYNC] Updating schemas");
        repository::refresh(runner, config).await
    };
    record(&mut phases, Phase::Refresh, status, config.policy.refresh)?;

    // --- Clean ---
    info!(output_dir = %config.output_path().display(), "[SYNC] Deleting old schemas");
    let status = generate::clear_output(config).map_err(|e| {
        error!(error = %e, "[SYNC][ERROR] Failed to clear output directory");
        e
    })?;
    record(&mut phases, Phase::Clean, status, OnError::Abort)?;

    // --- Compile ---
    info!("[SYNC] Compiling schemas");
    let status = generate::compile(runner, config).await;
    record(&mut phases, Phase::Compile, status, config.policy.compile)?;

    // --- Index ---
    info!("[SYNC] Collecting compiled schemas");
    let written = index::synthesise(config).map_err(|e| {
        error!(error = %e, "[SYNC][ERROR] Failed to write index");
        e
    })?;
    record(&mut phases, Phase::Index, PhaseStatus::Succeeded, OnError::Abort)?;

    let report = SyncReport {
        phases,
        index_path: written.path,
        exports: written.exports,
    };
    let failed = report.failed_phases();
    if failed.is_empty() {
        info!(exports = report.exports.len(), "[SYNC] Synchronisation complete");
    } else {
        warn!(?failed, exports = report.exports.len(), "[SYNC] Synchronisation finished with failed phases");
    }
    Ok(report)
}

fn record(
    phases: &mut Vec<PhaseReport>,
    phase: Phase,
    status: PhaseStatus,
    on_error: OnError,
) -> Result<(), SyncError> {
    phases.push(PhaseReport { phase, status });
    if status == PhaseStatus::Failed && on_error == OnError::Abort {
        error!(%phase, "[SYNC][ERROR] Phase failed, aborting");
        return Err(SyncError::PhaseFailed { phase });
    }
    Ok(())
}
