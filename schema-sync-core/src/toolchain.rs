//! Make sure the schema compiler is on hand before anything needs it.

use tracing::{info, warn};

use crate::command::try_run;
use crate::config::GeneratorConfig;
use crate::contract::{CommandRunner, Invocation};
use crate::synchronise::PhaseStatus;

/// Probes `<program> --help` and falls back to `cargo install --git` when the
/// probe fails. The install is unpinned and unverified.
pub async fn ensure_generator<R>(runner: &R, generator: &GeneratorConfig) -> PhaseStatus
where
    R: CommandRunner + ?Sized,
{
    let probe = match Invocation::parse(&format!("{} --help", generator.program)) {
        Ok(probe) => probe.silent(),
        Err(e) => {
            warn!(error = %e, "Generator program is blank, cannot probe or install");
            return PhaseStatus::Failed;
        }
    };
    if try_run(runner, &probe).await {
        info!(program = %generator.program, "Generator available");
        return PhaseStatus::Succeeded;
    }

    info!(
        program = %generator.program,
        source = %generator.install_source,
        "Installing generator"
    );
    let install = match Invocation::parse(&format!("cargo install --git {}", generator.install_source)) {
        Ok(install) => install,
        Err(e) => {
            warn!(error = %e, "Install command could not be built");
            return PhaseStatus::Failed;
        }
    };
    if try_run(runner, &install).await {
        PhaseStatus::Succeeded
    } else {
        warn!(program = %generator.program, "Generator install failed, later phases may produce nothing");
        PhaseStatus::Failed
    }
}
