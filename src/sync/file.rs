//! Atomic file operations for archives.
//!
//! Archives are never modified in place:
//! - New content is written to a temp file in the target's directory
//! - The temp file is synced to disk, then renamed over the target
//!
//! If any step fails the temp file is removed and the original file (if
//! any) remains untouched.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Directory that holds `path`, treating a bare file name as `.`.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create a temp file next to `path` so the final rename stays on one
/// filesystem.
///
/// # Errors
///
/// Returns an error if the directory is not writable.
pub fn temp_file_beside(path: &Path) -> Result<NamedTempFile> {
    let temp = tempfile::Builder::new()
        .prefix(".tua-")
        .suffix(".jsonl.tmp")
        .tempfile_in(parent_dir(path))?;
    Ok(temp)
}

/// Sync `temp` to disk and atomically rename it to `path`.
///
/// An existing target's permissions are carried over to the replacement.
///
/// # Errors
///
/// Returns an error if syncing, chmod, or the rename fails. On error the
/// target is unchanged.
pub fn commit(temp: NamedTempFile, path: &Path) -> Result<()> {
    temp.as_file().sync_all()?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.persist(path)?;
    Ok(())
}

/// Read one line including its terminator. Returns `None` at EOF.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn read_first_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Count the number of lines in an archive.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn count_lines(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.split(b'\n') {
        line?;
        count += 1;
    }
    Ok(count)
}
