//! Atomic file replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::NavError;

/// Replace the file at `path` with `contents`.
///
/// The data goes to a temporary file in the same directory, is synced, and
/// is then renamed over `path`. Readers see either the old or the new file,
/// never a partial one. The temporary file is removed if any step fails.
/// Permissions of an existing file are carried over.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), NavError> {
    let write_error = |source: std::io::Error| NavError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".navsync-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    tmp.write_all(contents).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_error)?;
    }

    tmp.persist(path).map_err(|e| write_error(e.error))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
