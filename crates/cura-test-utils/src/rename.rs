//! [`Renamer`] doubles for the final commit step.

use cura_fs::Renamer;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fails every rename whose target file name is in `targets`, and performs
/// the others.
#[derive(Debug, Clone, Default)]
pub struct FailingRename {
    targets: Vec<String>,
}

impl FailingRename {
    /// Fail renames onto any file.
    pub fn always() -> Self {
        Self {
            targets: vec!["*".to_string()],
        }
    }

    /// Fail renames onto files named `name`.
    pub fn onto(name: &str) -> Self {
        Self {
            targets: vec![name.to_string()],
        }
    }
}

impl Renamer for FailingRename {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let name = to
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.targets.iter().any(|t| t == "*" || *t == name) {
            return Err(io::Error::other("simulated crash before rename"));
        }
        std::fs::rename(from, to)
    }
}

/// Performs renames and records their targets.
#[derive(Debug, Clone, Default)]
pub struct RecordingRename {
    renamed: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingRename {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets renamed so far, in order.
    pub fn renamed(&self) -> Vec<PathBuf> {
        self.renamed.lock().unwrap().clone()
    }
}

impl Renamer for RecordingRename {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)?;
        self.renamed.lock().unwrap().push(to.to_path_buf());
        Ok(())
    }
}
