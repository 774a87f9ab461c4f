//! Atomic file replacement using a temporary file and rename.
use crate::error::StoreError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace the contents of `path` with `content`.
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so readers see either the old or the new file.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| {
        log::error!("[atomic] Failed to create temporary file in {:?}", parent_dir);
        e
    })?;

    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        log::error!("[atomic] Failed to persist temporary file to {:?}", path);
        e.error
    })?;

    Ok(())
}
