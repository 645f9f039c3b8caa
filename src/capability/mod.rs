//! Checker applicability.
//!
//! A [`Capability`] is a small predicate tree describing what the host must
//! provide before a checker may run: a platform, an executable on `PATH`, a
//! directory. Evaluation never fails; anything missing is simply `false`.
//!
//! # Modules
//!
//! - [`probe`] - Host facts and `PATH` lookup
//! - [`mock`] - In-memory host for tests

pub mod mock;
pub mod probe;

use std::path::PathBuf;

use tracing::debug;

use crate::shell::Platform;

pub use mock::MockHost;
pub use probe::{Host, SystemHost};

/// What a checker needs from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Always applicable.
    Always,

    /// Host platform must match.
    Platform(Platform),

    /// At least one of these executables must be on `PATH`.
    Executable(Vec<String>),

    /// Directory must exist.
    Directory(PathBuf),

    /// Every sub-capability must hold.
    All(Vec<Capability>),
}

impl Capability {
    /// Require a single executable.
    pub fn command(name: &str) -> Self {
        Capability::Executable(vec![name.to_string()])
    }

    /// Require any of several executables, tried in order.
    pub fn any_command(names: &[&str]) -> Self {
        Capability::Executable(names.iter().map(|n| n.to_string()).collect())
    }

    /// Require the host platform.
    pub fn platform(platform: Platform) -> Self {
        Capability::Platform(platform)
    }

    /// Require a directory.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Capability::Directory(path.into())
    }

    /// Combine with another capability; both must hold.
    pub fn and(self, other: Capability) -> Self {
        match self {
            Capability::All(mut all) => {
                all.push(other);
                Capability::All(all)
            }
            Capability::Always => other,
            first => Capability::All(vec![first, other]),
        }
    }

    /// Evaluate against host facts.
    pub fn is_met(&self, host: &dyn Host) -> bool {
        match self {
            Capability::Always => true,
            Capability::Platform(platform) => host.platform() == *platform,
            Capability::Executable(names) => {
                let found = resolve_first(host, names);
                if found.is_none() {
                    debug!("None of {:?} found on PATH", names);
                }
                found.is_some()
            }
            Capability::Directory(path) => host.dir_exists(path),
            Capability::All(all) => all.iter().all(|c| c.is_met(host)),
        }
    }
}

/// Find the first of `names` present on the host.
pub fn resolve_first(host: &dyn Host, names: &[String]) -> Option<PathBuf> {
    names.iter().find_map(|name| host.find_executable(name))
}
