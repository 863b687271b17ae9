//! File copy helpers.
//!
//! Auxiliary files and user-supplied manifests are copied into the workspace
//! with their permissions and timestamps intact, the same way `cp -p` would.

use crate::error::{CraftError, Result};
use std::fs::{self, File, FileTimes};
use std::path::Path;

/// Create `path` and any missing parents.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| {
        CraftError::io(
            format!("failed to create directory '{}'", path.display()),
            e,
        )
    })
}

/// Copy `source` to `destination`, keeping permissions and access/modification times.
///
/// Missing parent directories of `destination` are created. Timestamps are
/// applied best-effort: a filesystem that refuses them produces a warning,
/// not an error, since the content copy already succeeded.
pub fn copy_preserving_metadata<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let metadata = fs::metadata(source).map_err(|e| {
        CraftError::io(format!("failed to read '{}'", source.display()), e)
    })?;

    // fs::copy carries the permission bits over.
    fs::copy(source, destination).map_err(|e| {
        CraftError::io(
            format!(
                "failed to copy '{}' to '{}'",
                source.display(),
                destination.display()
            ),
            e,
        )
    })?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let applied = File::options()
        .write(true)
        .open(destination)
        .or_else(|_| File::open(destination))
        .and_then(|file| file.set_times(times));
    if let Err(e) = applied {
        eprintln!(
            "Warning: copied '{}' but could not preserve its timestamps: {}",
            destination.display(),
            e
        );
    }

    Ok(())
}

/// Add the execute bits to a file. No-op off Unix.
#[cfg(unix)]
pub fn set_executable<P: AsRef<Path>>(path: P) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    let mut perms = fs::metadata(path)
        .map_err(|e| CraftError::io(format!("failed to read '{}'", path.display()), e))?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(|e| {
        CraftError::io(
            format!("failed to make '{}' executable", path.display()),
            e,
        )
    })
}

#[cfg(not(unix))]
pub fn set_executable<P: AsRef<Path>>(_path: P) -> Result<()> {
    Ok(())
}
