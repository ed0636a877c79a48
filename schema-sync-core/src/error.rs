//! Error types shared across the core pipeline.
//!
//! Subprocess failures are mostly swallowed by the best-effort phases, so the
//! only errors that travel far are filesystem errors and aborting phases.

use std::path::PathBuf;

use crate::synchronise::Phase;

/// Failure to launch an external command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors for a synchronisation run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("phase {phase} failed and is configured to abort the run")]
    PhaseFailed { phase: Phase },
}

impl SyncError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
