//! Recursive bundle copy.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{InstallError, Result};
use crate::locator::InstallTarget;

/// Mirror the source tree onto the destination described by `target`.
///
/// With `force`, an existing destination subtree is removed first. The
/// remove+copy sequence is not atomic: a failure mid-copy leaves a partial
/// tree on disk for the operator to clean up or re-run with force.
pub fn mirror(target: &InstallTarget) -> Result<()> {
    if !target.source.exists() {
        return Err(InstallError::SourceNotFound {
            path: target.source.clone(),
        });
    }

    if target.force && target.destination.exists() {
        info!(
            "removing existing installation at {}",
            target.destination.display()
        );
        fs::remove_dir_all(&target.destination)
            .map_err(|e| InstallError::from_io(target.destination.clone(), e))?;
    }

    if let Some(parent) = target.destination.parent() {
        fs::create_dir_all(parent).map_err(|e| InstallError::from_io(parent.to_path_buf(), e))?;
    }

    copy_tree(&target.source, &target.destination)
}

/// Depth-first walk over (source, destination) path pairs. Directories are
/// created idempotently; files are copied byte-for-byte, overwriting any
/// existing file at the destination path. Sibling order does not matter:
/// every operation is additive or overwriting.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(|e| InstallError::from_io(src.to_path_buf(), e))?;

    if meta.is_dir() {
        if !dest.exists() {
            fs::create_dir_all(dest).map_err(|e| InstallError::from_io(dest.to_path_buf(), e))?;
        }
        let entries =
            fs::read_dir(src).map_err(|e| InstallError::from_io(src.to_path_buf(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| InstallError::from_io(src.to_path_buf(), e))?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        debug!("copy {} -> {}", src.display(), dest.display());
        fs::copy(src, dest).map_err(|e| InstallError::from_io(dest.to_path_buf(), e))?;
    }

    Ok(())
}

/// Caller-side postcondition for an installation: the marker file must exist
/// in the destination root after a copy that reported no error. Its absence
/// means the source bundle itself was incomplete.
pub fn verify_marker(destination: &Path, marker: &str) -> Result<()> {
    if destination.join(marker).exists() {
        Ok(())
    } else {
        Err(InstallError::Verification {
            path: destination.to_path_buf(),
        })
    }
}
