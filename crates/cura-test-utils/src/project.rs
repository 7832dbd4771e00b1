//! [`TestProject`] builder for file rewriting scenarios.

use cura_fs::NormalizedPath;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary directory holding OpenSCAD sources.
///
/// # Example
///
/// ```rust
/// use cura_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// let gear = project.write_scad("gear.scad", "gear();\n");
/// project.assert_file_contains("gear.scad", "gear();");
/// assert!(gear.as_str().ends_with("/gear.scad"));
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Normalized path of `name` inside the project; the file need not exist.
    pub fn path(&self, name: &str) -> NormalizedPath {
        NormalizedPath::new(self.root()).join(name)
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn write_scad(&self, name: &str, content: &str) -> NormalizedPath {
        let full_path = self.root().join(name);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self.path(name)
    }

    /// Content of `name`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        let full_path = self.root().join(name);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Names of all files in the project root, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn assert_file_exists(&self, name: &str) {
        let full_path = self.root().join(name);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    pub fn assert_file_not_exists(&self, name: &str) {
        let full_path = self.root().join(name);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file `name` contains `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "Expected {name} to contain {content:?}\nActual content:\n{file_content}"
        );
    }

    /// Assert that the file `name` equals `expected` byte for byte.
    pub fn assert_file_eq(&self, name: &str, expected: &str) {
        let file_content = self.read(name);
        assert!(
            file_content == expected,
            "Content of {name} differs\nExpected:\n{expected}\nActual:\n{file_content}"
        );
    }
}
