//! NuGet package lookup
//!
//! `dotnet pack` writes `.nupkg` files into the pack output directory. A
//! relative output directory is resolved under the module directory; an
//! absolute one is shared by all modules.

use crate::error::PackageNotFound;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PACKAGE_FILE_SUFFIX: &str = ".nupkg";

/// Returns true if `file_name` looks like a NuGet package. Only the name is checked.
pub fn is_package_file(file_name: &str) -> bool {
    file_name.ends_with(PACKAGE_FILE_SUFFIX)
}

pub fn resolve_output_directory(pack_output: &Path, module_directory: &Path) -> PathBuf {
    if pack_output.is_absolute() {
        return pack_output.to_path_buf();
    }
    module_directory.join(pack_output)
}

/// Returns the first package file in the resolved output directory.
///
/// When several packages exist, which one is returned depends on listing order.
pub fn find_packaged_artifact<F: FileSystem + ?Sized>(
    fs: &F,
    pack_output: &Path,
    module_directory: &Path,
) -> Result<PathBuf, PackageNotFound> {
    let package_directory = resolve_output_directory(pack_output, module_directory);

    let not_found = || PackageNotFound {
        module_directory: module_directory.to_path_buf(),
        package_directory: package_directory.clone(),
        pack_output: pack_output.to_path_buf(),
    };

    let entries = fs.read_dir(&package_directory).map_err(|e| {
        debug!(error = %e, "Could not list {}", package_directory.display());
        not_found()
    })?;

    let package = entries
        .into_iter()
        .find(|entry| is_package_file(entry.file_name()))
        .map(|entry| entry.path)
        .ok_or_else(not_found)?;

    debug!("Found package {}", package.display());
    Ok(package)
}
