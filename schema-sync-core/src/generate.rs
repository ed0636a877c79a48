//! Output regeneration: wipe the owned output directory, then hand the schema
//! sources to the compiler.

use tracing::{info, warn};

use crate::command::try_run;
use crate::config::SyncConfig;
use crate::contract::{CommandRunner, Invocation};
use crate::error::SyncError;
use crate::synchronise::PhaseStatus;

/// Removes the output directory if present. Absence is not an error; any
/// other filesystem failure is.
pub fn clear_output(config: &SyncConfig) -> Result<PhaseStatus, SyncError> {
    let output_dir = config.output_path();
    let removed = crate::fs::remove_dir_if_present(&output_dir)?;
    info!(path = %output_dir.display(), removed, "Cleared previous output");
    Ok(PhaseStatus::Succeeded)
}

/// Built argument by argument rather than parsed, so directories containing
/// spaces stay single arguments.
pub fn compile_invocation(config: &SyncConfig) -> Invocation {
    Invocation::new(&config.generator.program)
        .arg(&config.generator.language)
        .arg(config.schema_path().to_string_lossy())
        .arg(config.output_path().to_string_lossy())
}

/// Runs `<program> <language> <schema_dir> <output_dir>` once. The compiler
/// recreates the output directory itself.
pub async fn compile<R>(runner: &R, config: &SyncConfig) -> PhaseStatus
where
    R: CommandRunner + ?Sized,
{
    let invocation = compile_invocation(config);
    if try_run(runner, &invocation).await {
        info!(command = %invocation, "Schemas compiled");
        PhaseStatus::Succeeded
    } else {
        warn!(command = %invocation, "Schema compiler failed, index may be empty");
        PhaseStatus::Failed
    }
}
