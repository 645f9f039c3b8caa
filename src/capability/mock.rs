//! In-memory host for testing capability and checker logic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::shell::Platform;

use super::Host;

/// Host whose facts are set explicitly.
///
/// Executables resolve to `/usr/bin/<name>`.
#[derive(Debug, Clone)]
pub struct MockHost {
    platform: Platform,
    executables: HashSet<String>,
    directories: HashSet<PathBuf>,
}

impl MockHost {
    /// Create a host with no executables and no directories.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            executables: HashSet::new(),
            directories: HashSet::new(),
        }
    }

    /// Add an executable to the fake `PATH`.
    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables.insert(name.to_string());
        self
    }

    /// Add an existing directory.
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.insert(path.into());
        self
    }
}

impl Host for MockHost {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}
