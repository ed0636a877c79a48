//! Command runner: parse whitespace-delimited command lines and launch them.
//!
//! Two flavours mirror the two ways the pipeline treats subprocesses:
//! - [`CommandRunner::run`] propagates launch failures (missing executable).
//! - [`try_run`] swallows them and reports plain failure.
//!
//! Exit statuses follow the POSIX convention: 0 is success, anything else
//! (including termination by signal) is failure.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::contract::{CommandRunner, Invocation};
use crate::error::CommandError;

impl Invocation {
    /// Splits `line` on whitespace. Quoting is not supported, so arguments
    /// containing spaces cannot be expressed this way.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let program = tokens.next().ok_or(CommandError::Empty)?;
        Ok(Invocation::new(program).args(tokens))
    }
}

/// Where a non-silent child's stdout goes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChildStdout {
    #[default]
    Inherit,
    /// Keeps our own stdout clean for machine-readable output.
    Stderr,
}

/// Runs commands as real child processes and waits for them to finish.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    pub child_stdout: ChildStdout,
}

impl SystemRunner {
    pub fn new(child_stdout: ChildStdout) -> Self {
        Self { child_stdout }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<bool, CommandError> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }
        if let Some(env) = &invocation.env {
            command.env_clear().envs(env);
        }
        command
            .stdin(Stdio::inherit())
            .stdout(match (invocation.silent, self.child_stdout) {
                (true, _) => Stdio::null(),
                (false, ChildStdout::Inherit) => Stdio::inherit(),
                (false, ChildStdout::Stderr) => Stdio::from(std::io::stderr()),
            })
            .stderr(Stdio::inherit());

        debug!(
            command = %invocation,
            cwd = ?invocation.current_dir,
            silent = invocation.silent,
            "Launching command"
        );
        let status = command
            .status()
            .await
            .map_err(|source| CommandError::Launch {
                program: invocation.program.clone(),
                source,
            })?;
        debug!(command = %invocation, status = ?status, "Command finished");
        Ok(status.success())
    }
}

/// Best-effort variant of [`CommandRunner::run`]: a command that cannot be
/// launched counts as a failed command instead of an error.
pub async fn try_run<R>(runner: &R, invocation: &Invocation) -> bool
where
    R: CommandRunner + ?Sized,
{
    match runner.run(invocation).await {
        Ok(true) => true,
        Ok(false) => {
            warn!(command = %invocation, "Command exited unsuccessfully, continuing");
            false
        }
        Err(e) => {
            warn!(command = %invocation, error = %e, "Command could not be launched, continuing");
            false
        }
    }
}
