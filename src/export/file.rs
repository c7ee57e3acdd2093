//! File output with atomic replace
//!
//! Writes go to a sibling temp file that is flushed and synced before being
//! renamed over the target. The temp handle is closed on every path, and
//! the temp file is removed when anything fails.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ExportFormat;
use crate::error::{LedgerError, LedgerResult};

/// Write bytes to `path`, replacing it atomically
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> LedgerResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            LedgerError::Io(format!("Failed to move file into {}: {}", path.display(), e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write an export to `path`, or into `dir` under the format's default name
///
/// Returns the path that was written.
pub fn write_export(
    dir: &Path,
    path: Option<&Path>,
    format: ExportFormat,
    bytes: &[u8],
) -> LedgerResult<PathBuf> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => dir.join(format.default_file_name()),
    };
    write_atomic(&target, bytes)?;
    Ok(target)
}

fn write_synced(path: &Path, bytes: &[u8]) -> LedgerResult<()> {
    let file = File::create(path)
        .map_err(|e| LedgerError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| LedgerError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Io(format!("Failed to sync {}: {}", path.display(), e)))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("spendbook"));
    name.push(".tmp");
    path.with_file_name(name)
}
