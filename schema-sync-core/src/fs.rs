//! Filesystem bookkeeping: ensure directory chains, open files for writing,
//! remove owned directories.
//!
//! These are the only operations in a run whose failure is fatal.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::SyncError;

/// Creates every missing directory along `path`, outermost first, and returns
/// how many were created.
///
/// A directory appearing concurrently between the existence check and the
/// create call is accepted. An existing non-directory on the path is not.
pub fn ensure_dir(path: &Path) -> Result<usize, SyncError> {
    let mut missing = Vec::new();
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        match fs::metadata(ancestor) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => return Err(SyncError::NotADirectory(ancestor.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => missing.push(ancestor),
            Err(e) => return Err(SyncError::io("inspect", ancestor, e)),
        }
    }

    create_top_down(missing.into_iter().rev())
}

/// Creates each directory in turn. One that already exists as a directory,
/// for instance made by another process after the scan, is not counted.
fn create_top_down<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> Result<usize, SyncError> {
    let mut created = 0;
    for dir in dirs {
        match fs::create_dir(dir) {
            Ok(()) => {
                debug!(path = %dir.display(), "Created directory");
                created += 1;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !dir.is_dir() {
                    return Err(SyncError::NotADirectory(dir.to_path_buf()));
                }
            }
            Err(e) => return Err(SyncError::io("create directory", dir, e)),
        }
    }
    Ok(created)
}

/// Opens `path` for writing, truncating it, after creating its parent chain.
pub fn create_file(path: &Path) -> Result<File, SyncError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    File::create(path).map_err(|e| SyncError::io("create file", path, e))
}

/// Removes the directory tree at `path` if it exists. Returns whether
/// anything was removed.
pub fn remove_dir_if_present(path: &Path) -> Result<bool, SyncError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| SyncError::io("remove directory", path, e))?;
            debug!(path = %path.display(), "Removed directory");
            Ok(true)
        }
        Ok(_) => Err(SyncError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SyncError::io("inspect", path, e)),
    }
}
