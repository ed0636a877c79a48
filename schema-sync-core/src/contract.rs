//! # contract: the seam between the pipeline and the outside world
//!
//! Every external program the pipeline touches (git, cargo, the schema
//! compiler) is launched through the [`CommandRunner`] trait, described by an
//! [`Invocation`].
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so pipeline tests can script
//!   subprocess outcomes and simulate the generator writing files.
//! - [`crate::command::SystemRunner`] is the real implementation.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::CommandError;

/// A single external command: program, arguments and launch options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child. `None` inherits the caller's.
    pub current_dir: Option<PathBuf>,
    /// Replaces the inherited environment entirely when set.
    pub env: Option<HashMap<String, String>>,
    /// Discard stdout. Stderr is always inherited.
    pub silent: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: None,
            silent: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Launches external commands.
///
/// `Ok(true)` means the command ran and exited with status 0, `Ok(false)` that
/// it ran and failed. `Err` is reserved for commands that could not be
/// launched at all.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<bool, CommandError>;
}
