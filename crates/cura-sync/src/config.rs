//! Synchronizer settings

use crate::Result;
use cura_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

/// How [`crate::Synchronizer`] commits its changes.
///
/// Any field may be omitted from a config file:
/// ```toml
/// dry_run = true
/// backup_extension = "bak"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Compute the new content and a diff without touching the disk.
    pub dry_run: bool,
    /// Keep the previous content next to each rewritten file.
    pub backup: bool,
    /// Extension appended to a file's name for its backup.
    pub backup_extension: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
            backup_extension: "old".to_string(),
        }
    }
}

impl SyncConfig {
    /// Load from a TOML, JSON or YAML file; a missing file gives the
    /// defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// The backup extension to use, or `None` when backups are off.
    pub fn backup_extension(&self) -> Option<&str> {
        self.backup.then_some(self.backup_extension.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert!(!config.dry_run);
        assert_eq!(config.backup_extension(), Some("old"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("sync.toml"));
        std::fs::write(path.to_native(), "dry_run = true\n").unwrap();

        let config = SyncConfig::load(&path).unwrap();
        assert!(config.dry_run);
        assert!(config.backup);
        assert_eq!(config.backup_extension, "old");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("absent.yaml"));
        assert_eq!(SyncConfig::load(&path).unwrap(), SyncConfig::default());
    }

    #[test]
    fn test_backup_disabled() {
        let config = SyncConfig {
            backup: false,
            ..SyncConfig::default()
        };
        assert_eq!(config.backup_extension(), None);
    }

    #[test]
    fn test_save_then_load_json() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("sync.json"));
        let config = SyncConfig {
            dry_run: true,
            backup: false,
            backup_extension: "bak".to_string(),
        };
        config.save(&path).unwrap();
        assert_eq!(SyncConfig::load(&path).unwrap(), config);
    }
}
