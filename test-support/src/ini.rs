//! Temporary INI files.

#![expect(clippy::expect_used, reason = "simplify test setup")]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An INI file inside its own temporary directory.
///
/// The directory, and the file with it, is removed on drop.
#[derive(Debug)]
pub struct IniFixture {
    dir: TempDir,
    path: PathBuf,
}

impl IniFixture {
    /// Create `app.ini` holding `contents`.
    pub fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("app.ini");
        fs::write(&path, contents).expect("write ini fixture");
        Self { dir, path }
    }

    /// Path of the INI file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path in the same directory that does not exist.
    pub fn missing(&self) -> PathBuf {
        self.dir.path().join("missing.ini")
    }

    /// Write another INI file named `name` next to the fixture.
    pub fn sibling(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write sibling ini");
        path
    }
}
