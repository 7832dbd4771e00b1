//! Atomic I/O operations with file locking
//!
//! Every write lands in a sibling temp file first and reaches its final name
//! through a single rename, so a reader never observes a truncated file.

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The final step of a commit: moving the finished temp file into place.
///
/// Kept behind a trait so callers (and tests) can observe or interrupt the
/// one operation that makes new content visible.
pub trait Renamer {
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}

/// [`Renamer`] backed by [`std::fs::rename`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdRenamer;

impl Renamer for StdRenamer {
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        fs::rename(from, to)
    }
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let temp_path = write_temp(path, content)?;
    commit(&temp_path, path, &StdRenamer)
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Replace a file's content, keeping the previous content as a backup.
///
/// Sequence:
/// 1. the new content is written and synced to `.{name}.{pid}.tmp`
/// 2. the current file is preserved as `{name}.{backup_extension}`
///    (hard link, falling back to a copy) when a backup is requested
/// 3. the temp file is renamed over the original through `renamer`
///
/// The original path stays readable with its old content until step 3
/// succeeds. A failed step 3 removes the temp file and reports
/// [`Error::Commit`].
pub fn replace_with_backup(
    path: &NormalizedPath,
    content: &str,
    backup_extension: Option<&str>,
    renamer: &dyn Renamer,
) -> Result<()> {
    let temp_path = write_temp(path, content.as_bytes())?;

    if let Some(extension) = backup_extension.filter(|_| path.is_file()) {
        let backup = path.with_appended_extension(extension);
        if let Err(e) = preserve_backup(path, &backup) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    commit(&temp_path, path, renamer)
}

fn temp_path_for(native_path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    native_path.with_file_name(temp_name)
}

fn write_temp(path: &NormalizedPath, content: &[u8]) -> Result<PathBuf> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the final rename on one filesystem
    let temp_path = temp_path_for(&native_path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    Ok(temp_path)
}

fn preserve_backup(path: &NormalizedPath, backup: &NormalizedPath) -> Result<()> {
    let original = path.to_native();
    let backup = backup.to_native();

    if backup.exists() {
        fs::remove_file(&backup).map_err(|e| Error::io(&backup, e))?;
    }
    if fs::hard_link(&original, &backup).is_err() {
        fs::copy(&original, &backup).map_err(|e| Error::io(&backup, e))?;
    }
    tracing::debug!(backup = %backup.display(), "Preserved previous content");
    Ok(())
}

fn commit(temp_path: &Path, path: &NormalizedPath, renamer: &dyn Renamer) -> Result<()> {
    let native_path = path.to_native();
    renamer.rename(temp_path, &native_path).map_err(|source| {
        let _ = fs::remove_file(temp_path);
        Error::Commit {
            path: native_path.clone(),
            source,
        }
    })
}
