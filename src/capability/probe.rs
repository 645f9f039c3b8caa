//! Host facts used to decide whether a checker applies.
//!
//! Every question a [`Capability`](super::Capability) can ask goes through
//! the [`Host`] trait, so capability logic is testable against a fake host
//! while [`SystemHost`] answers from the real environment.
//!
//! # Example
//!
//! ```no_run
//! use upgrade_all::capability::probe::{Host, SystemHost};
//!
//! let host = SystemHost::from_env();
//! if let Some(brew) = host.find_executable("brew") {
//!     println!("Homebrew at {}", brew.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::shell::Platform;

/// Facts about the machine upgrade-all is running on.
pub trait Host {
    /// Operating system family.
    fn platform(&self) -> Platform;

    /// Locate an executable by name on the search path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Whether `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;
}

/// The real host: current platform, `PATH` and filesystem.
#[derive(Debug, Clone)]
pub struct SystemHost {
    platform: Platform,
    path_entries: Vec<PathBuf>,
}

impl SystemHost {
    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self {
            platform: Platform::current(),
            path_entries: parse_system_path(),
        }
    }

    /// Build with an explicit platform and search path.
    pub fn new(platform: Platform, path_entries: Vec<PathBuf>) -> Self {
        Self {
            platform,
            path_entries,
        }
    }
}

impl Host for SystemHost {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        resolve_tool_path(name, &self.path_entries)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Executable suffixes to try for each command name.
///
/// Honors `PATHEXT` on Windows; elsewhere only the bare name is tried.
fn executable_suffixes() -> Vec<String> {
    match std::env::var("PATHEXT") {
        Ok(exts) if cfg!(windows) => exts.split(';').map(str::to_string).collect(),
        _ => vec![String::new()],
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that is a regular, executable file.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let suffixes = executable_suffixes();
    for dir in path_entries {
        for suffix in &suffixes {
            let candidate = dir.join(format!("{}{}", tool, suffix));
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
