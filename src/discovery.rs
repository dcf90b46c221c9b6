//! Project directory discovery
//!
//! A directory is a project root when it contains a `project.json` file as an
//! immediate child. The base directory is checked first; only when it is not a
//! project root are its immediate children scanned. Results are recomputed on
//! every call.

use crate::error::BuildError;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MANIFEST_FILE_NAME: &str = "project.json";

/// Returns true if `dir` is a directory holding a `project.json` child.
pub fn is_project_directory<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> bool {
    fs.is_dir(dir) && fs.exists(&dir.join(MANIFEST_FILE_NAME))
}

/// Finds project directories at or directly below `base_directory`.
///
/// With `skip` set this returns immediately without touching the filesystem.
/// Children are returned in listing order. An unreadable base directory is
/// treated like one without matches.
pub fn find_project_directories<F: FileSystem + ?Sized>(
    fs: &F,
    base_directory: &Path,
    skip: bool,
    require_match: bool,
) -> Result<Vec<PathBuf>, BuildError> {
    if skip {
        debug!("Skip flag set, not scanning {}", base_directory.display());
        return Ok(Vec::new());
    }

    if is_project_directory(fs, base_directory) {
        debug!(
            "Base directory {} is a project directory",
            base_directory.display()
        );
        return Ok(vec![base_directory.to_path_buf()]);
    }

    let directories: Vec<PathBuf> = match fs.read_dir(base_directory) {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| entry.is_dir())
            .map(|entry| entry.path)
            .filter(|path| is_project_directory(fs, path))
            .collect(),
        Err(e) => {
            debug!(error = %e, "Could not list {}", base_directory.display());
            Vec::new()
        }
    };

    if directories.is_empty() {
        if require_match {
            return Err(BuildError::NoProjectDirectories {
                base_directory: base_directory.to_path_buf(),
            });
        }
        warn!(
            "No directories with a '{}' file found in {}",
            MANIFEST_FILE_NAME,
            base_directory.display()
        );
        return Ok(Vec::new());
    }

    debug!(
        count = directories.len(),
        "Found project directories in {}",
        base_directory.display()
    );
    Ok(directories)
}
