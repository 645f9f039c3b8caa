//! Configuration loading.
//!
//! # Modules
//!
//! - [`schema`] - Config file structure and defaults
//! - [`loader`] - File discovery and parsing

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, load_from_path};
pub use schema::{FeedSettings, HttpSettings, UpgradeConfig, XcodeSettings};
