//! Whole-file I/O with atomic writes and backups

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::constants::BACKUP_SUFFIX;
use crate::{Error, Result};

/// Read a file's content as UTF-8 text.
///
/// The file is opened, fully consumed, and closed in one call; no other
/// encoding is supported.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| Error::InvalidEncoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read source file");
    Ok(text)
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename to prevent partial writes, and holds an
/// advisory lock on the temp file while writing.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");

    Ok(())
}

/// The sibling path a backup of `path` is written to.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy the file at `path` to its backup sibling, returning the backup path.
///
/// Only meaningful before an overwrite; the caller decides whether a backup
/// is wanted.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), backup = %backup.display(), "backup created");
    Ok(backup)
}
