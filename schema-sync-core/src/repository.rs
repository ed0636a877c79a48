//! Refresh the repository and the nested schema checkout.
//!
//! Every git step runs regardless of how the previous one went. The schema
//! steps get the checkout as their subprocess working directory; the process
//! working directory is never touched.

use tracing::{info, warn};

use crate::command::try_run;
use crate::config::SyncConfig;
use crate::contract::{CommandRunner, Invocation};
use crate::error::CommandError;
use crate::synchronise::PhaseStatus;

/// The git invocations for one refresh, in execution order. The first two run
/// in the repository root, the rest inside the schema checkout.
pub fn refresh_steps(config: &SyncConfig) -> Result<Vec<Invocation>, CommandError> {
    let root = &config.root;
    let schemas = config.schema_path();
    let remote = &config.repository.remote;
    let branch = &config.repository.branch;
    Ok(vec![
        Invocation::parse("git remote update")?.current_dir(root),
        Invocation::parse("git submodule update --recursive")?.current_dir(root),
        Invocation::parse("git fetch --all")?.current_dir(&schemas),
        Invocation::parse(&format!("git checkout {branch}"))?.current_dir(&schemas),
        Invocation::parse(&format!("git pull {remote} {branch}"))?.current_dir(&schemas),
    ])
}

pub async fn refresh<R>(runner: &R, config: &SyncConfig) -> PhaseStatus
where
    R: CommandRunner + ?Sized,
{
    let steps = match refresh_steps(config) {
        Ok(steps) => steps,
        Err(e) => {
            warn!(error = %e, "Could not build git commands");
            return PhaseStatus::Failed;
        }
    };
    let mut failed = 0usize;
    for step in steps {
        if !try_run(runner, &step).await {
            failed += 1;
        }
    }
    info!(
        schema_dir = %config.schema_path().display(),
        branch = %config.repository.branch,
        failed_steps = failed,
        "Schema refresh finished"
    );
    if failed == 0 {
        PhaseStatus::Succeeded
    } else {
        PhaseStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn schema_steps_run_inside_the_checkout() {
        let config = SyncConfig {
            root: PathBuf::from("/repo"),
            ..SyncConfig::default()
        };
        let steps = refresh_steps(&config).unwrap();
        let lines: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "git remote update",
                "git submodule update --recursive",
                "git fetch --all",
                "git checkout master",
                "git pull origin master",
            ]
        );
        assert_eq!(steps[0].current_dir.as_deref(), Some(Path::new("/repo")));
        assert_eq!(steps[1].current_dir.as_deref(), Some(Path::new("/repo")));
        for step in &steps[2..] {
            assert_eq!(
                step.current_dir.as_deref(),
                Some(Path::new("/repo/schemas"))
            );
        }
    }
}
