//! Small filesystem primitives shared by the desktop entry and icon code.
//!
//! Desktop entries are written atomically:
//! 1. Write to a temp file with a PID suffix next to the target
//! 2. fsync to ensure data reaches disk
//! 3. Atomic rename to the target path
//!
//! Menu indexers watch the applications directory, so they must never observe
//! a half-written entry.

use crate::error::{A2dError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process;
use std::time::SystemTime;
use tracing::debug;

/// Write `contents` to `path` through a temp file and rename.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| A2dError::io_context("create directory", parent, e))?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.{}.tmp", process::id()));

    let write_result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(e) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(A2dError::io_context("write temp file", &temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        A2dError::io_context("rename temp file", path, e)
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Create a symlink at `dest` pointing to `src`.
pub fn create_symlink(src: &Path, dest: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(src, dest).map_err(|e| A2dError::SymlinkFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        })
    }

    #[cfg(not(unix))]
    {
        Err(A2dError::SymlinkFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: "symlinks are not supported on this platform".to_string(),
        })
    }
}

/// Remove a file or symlink, returning whether anything was there.
///
/// Dangling symlinks count as present.
pub fn remove_if_present(path: &Path) -> Result<bool> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(false);
    }

    fs::remove_file(path).map_err(|e| A2dError::io_context("remove file", path, e))?;
    Ok(true)
}

/// Set the modification time of a file or directory to now.
///
/// Icon cache daemons rebuild a theme when its root directory mtime changes.
pub fn touch_modified(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| A2dError::io_context("open for touch", path, e))?;
    file.set_modified(SystemTime::now())
        .map_err(|e| A2dError::io_context("update modification time", path, e))?;

    debug!("Touched {}", path.display());
    Ok(())
}
