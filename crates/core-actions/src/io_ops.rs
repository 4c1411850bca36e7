//! File IO for the storage collaborator: load, save, backup.
//!
//! Synchronous and minimal. Lines are split on `\n` (CRLF tolerated on
//! load); saving joins with `\n` and writes no trailing newline after the
//! final line, making save the exact inverse of load's split. Callers map
//! errors to status messages; the in-memory document is never touched on
//! failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Read a file into lines. An empty file yields the minimum single empty
/// line.
pub fn load(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    debug!(target: "io", file = %path.display(), line_count = lines.len(), "file_loaded");
    Ok(lines)
}

/// Write lines joined by `\n`.
pub fn save(path: &Path, lines: &[String]) -> io::Result<()> {
    fs::write(path, lines.join("\n"))?;
    debug!(target: "io", file = %path.display(), line_count = lines.len(), "file_saved");
    Ok(())
}

/// Byte-identical pre-save snapshot at `<path>~`. Nothing to do when the
/// target does not exist yet.
pub fn backup(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let backup_path = backup_path_for(path);
    fs::copy(path, &backup_path)?;
    debug!(target: "io", file = %path.display(), backup = %backup_path.display(), "backup_written");
    Ok(())
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push("~");
    PathBuf::from(os)
}
