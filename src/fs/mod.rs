//! Atomic file replacement.
//!
//! Concurrent editors of the same manifest are serialized by the file system:
//! the new contents land in a temporary file next to the target and are
//! renamed over it, so readers never observe a half-written manifest.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Writes `contents` to `path` via a temp file and rename.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid manifest path: {}", path.display()))?;
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    log::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
