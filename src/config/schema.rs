//! Configuration schema definitions.
//!
//! Every field is optional; an empty file yields the built-in defaults.
//! Checker order and membership are fixed and cannot be configured.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Remote release feeds.
    pub feeds: FeedSettings,

    /// HTTP client settings.
    pub http: HttpSettings,

    /// Local Xcode installation.
    pub xcode: XcodeSettings,

    /// Default output mode (overridden by `--verbose`/`--quiet`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

/// Release feed locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// HTML page listing Ruby releases.
    pub ruby_releases_url: String,

    /// Prefix for site-relative links found on the Ruby releases page.
    pub ruby_link_prefix: String,

    /// JSON catalog of Xcode releases.
    pub xcode_releases_url: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            ruby_releases_url: "https://www.ruby-lang.org/en/downloads/releases/".to_string(),
            ruby_link_prefix: "https://www.ruby-lang.org".to_string(),
            xcode_releases_url: "https://xcodereleases.com/data.json".to_string(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Where Xcode lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XcodeSettings {
    /// Application bundle; the Xcode checker only applies when it exists.
    pub app_path: PathBuf,

    /// Property list holding `ProductBuildVersion`.
    pub version_plist: PathBuf,
}

impl Default for XcodeSettings {
    fn default() -> Self {
        Self {
            app_path: PathBuf::from("/Applications/Xcode.app"),
            version_plist: PathBuf::from("/Applications/Xcode.app/Contents/version.plist"),
        }
    }
}

/// Output verbosity as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}
