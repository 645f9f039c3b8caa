//! upgrade-all - Update every package manager on this machine.
//!
//! A fixed registry of checkers (macOS, Xcode, Mac App Store, Homebrew, Apt,
//! Snap, Ruby, RubyGems, Rust) runs in order. Checkers that do not apply to
//! the host are skipped; the first failure stops the run.
//!
//! # Modules
//!
//! - [`capability`] - Host probing and checker applicability
//! - [`checkers`] - The checker registry and run actions
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional YAML configuration
//! - [`error`] - Error types and result aliases
//! - [`feeds`] - Release feed fetching, parsing and comparison
//! - [`runner`] - Sequential fail-fast orchestration
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output and spinners
//!
//! # Example
//!
//! ```
//! use upgrade_all::feeds::ReleaseListParser;
//!
//! let page = "<table class=\"release-list\">\n<tr>\n<td>Ruby 3.2.2</td>\n</tr>\n</table>\n";
//! let latest = ReleaseListParser::new("https://www.ruby-lang.org").latest(page).unwrap();
//! assert_eq!(latest.version, "3.2.2");
//! ```

pub mod capability;
pub mod checkers;
pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, UpgradeError};
