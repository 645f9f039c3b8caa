//! Error types for upgrade-all operations.
//!
//! This module defines [`UpgradeError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `UpgradeError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `UpgradeError::Other`) for unexpected errors
//! - Checkers never let an error escape: each one is reported and turned into
//!   a failed run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for upgrade-all operations.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The HTTP request for a release feed could not be completed.
    #[error("Request to {url} failed: {message}")]
    FeedRequest { url: String, message: String },

    /// The release feed answered with a non-success status.
    #[error("Feed {url} returned HTTP {status}")]
    FeedStatus { url: String, status: u16 },

    /// The release feed body did not have the expected structure.
    #[error("Failed to parse {feed}: {message}")]
    FeedParse { feed: String, message: String },

    /// The locally installed version could not be determined.
    #[error("Cannot read installed version of {component}: {message}")]
    LocalVersion { component: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UpgradeError {
    /// Whether this error came from parsing a feed, as opposed to fetching it.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::FeedParse { .. })
    }
}

/// Result type alias for upgrade-all operations.
pub type Result<T> = std::result::Result<T, UpgradeError>;
