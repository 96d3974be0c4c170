//! Atomic whole-file replacement

use crate::io::error::QueueError;
use std::io::Write;
use std::path::Path;

/// Replace `path` with `content` so readers see either the old or the new
/// file, never a partial one
///
/// The content is written to a uniquely named sibling temp file
/// (`<name>.<random>.tmp`), fsynced, then renamed over `path`. On any
/// failure the temp file is removed and `path` is left untouched.
///
/// # Errors
///
/// Returns `QueueError::Io` if the temp file cannot be created, written or
/// synced, or if the final rename fails.
pub fn atomic_replace(path: &Path, content: &[u8]) -> Result<(), QueueError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = match path.file_name() {
        Some(name) => format!("{}.", name.to_string_lossy()),
        None => ".".to_string(),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| QueueError::io(dir, e))?;

    tmp.write_all(content)
        .map_err(|e| QueueError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| QueueError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| QueueError::io(path, e.error))?;
    Ok(())
}
