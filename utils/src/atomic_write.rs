//! Atomic file write helpers.
//!
//! Writes go to a temp file in the destination directory, which is then renamed
//! over the target. Where rename-over-existing fails (Windows), the old file is
//! moved aside to `.bak` first and restored if the second rename also fails.

use std::fs;
#[cfg(unix)]
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
#[cfg(unix)]
use tracing::debug;
use tracing::warn;

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Recover from an interrupted atomic write by restoring the `.bak` file.
///
/// If `path` is missing but `path.bak` exists, a crash happened inside the
/// backup window of [`atomic_write`]; move the backup back.
pub fn recover_bak_file(path: &Path) {
    let backup = backup_path(path);
    if path.exists() || !backup.exists() {
        return;
    }
    match fs::rename(&backup, path) {
        Ok(()) => warn!(
            path = %path.display(),
            "Recovered .bak file from interrupted atomic write"
        ),
        Err(e) => warn!(path = %path.display(), "Failed to recover .bak file: {e}"),
    }
}

/// Replace `path` with `bytes`.
///
/// The temp file is synced before the rename and, on Unix, the parent
/// directory is synced afterwards on a best-effort basis.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup = backup_path(path);
        let _ = fs::remove_file(&backup);
        fs::rename(path, &backup)?;

        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            warn!(path = %backup.display(), "Failed to remove .bak after atomic write: {e}");
        }
    }

    sync_dir_best_effort(parent);
    Ok(())
}

#[cfg(unix)]
fn sync_dir_best_effort(dir: &Path) {
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        debug!(path = %dir.display(), "Parent directory sync_all failed (best-effort): {e}");
    }
}

// Directory handles cannot be synced portably outside Unix.
#[cfg(not(unix))]
fn sync_dir_best_effort(_dir: &Path) {}
