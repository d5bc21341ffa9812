//! Package manager: installs and removes script bundles under the watched
//! root. There is no cache to invalidate; the tree is rebuilt from scratch on
//! every process start, so a freshly installed bundle appears on the next run.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::{PkgError, PkgResult};

/// Copy a script bundle (file or directory) to `destination`.
///
/// An existing destination is an error unless `force`, in which case it is
/// replaced. Missing parent directories of the destination are created.
pub fn install(source: &Path, destination: &Path, force: bool) -> PkgResult<()> {
    if !source.exists() {
        return Err(PkgError::Missing(source.to_path_buf()));
    }
    if destination.exists() {
        if !force {
            return Err(PkgError::Exists(destination.to_path_buf()));
        }
        debug!("Replacing {}", destination.display());
        remove_any(destination)?;
    }
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PkgError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    if source.is_dir() {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.copy_inside = true;
        fs_extra::dir::copy(source, destination, &options).map_err(|e| PkgError::Copy {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    } else {
        std::fs::copy(source, destination).map_err(|e| PkgError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
    }
    info!("Installed {} -> {}", source.display(), destination.display());
    Ok(())
}

/// Delete a previously installed bundle. A missing target is an error unless
/// `force`, which turns it into a no-op.
pub fn remove(target: &Path, force: bool) -> PkgResult<()> {
    if !target.exists() {
        if force {
            debug!("Nothing to remove at {}", target.display());
            return Ok(());
        }
        return Err(PkgError::Missing(target.to_path_buf()));
    }
    remove_any(target)?;
    info!("Removed {}", target.display());
    Ok(())
}

fn remove_any(path: &Path) -> PkgResult<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| PkgError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
