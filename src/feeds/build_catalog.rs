//! Xcode release catalog parsing.
//!
//! The catalog is a JSON array, newest release first. Entries look like:
//!
//! ```json
//! {
//!   "version": {
//!     "build": "15A240d",
//!     "number": "15.0",
//!     "release": { "release": true }
//!   },
//!   "links": {
//!     "download": { "url": "https://download.developer.apple.com/..." },
//!     "notes": { "url": "https://developer.apple.com/..." }
//!   }
//! }
//! ```
//!
//! Betas and release candidates carry a different `release` object and are
//! filtered out, as is anything malformed.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, UpgradeError};

use super::version::{Link, LinkKind, Published};

const FEED_NAME: &str = "Xcode releases";

/// A final release from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Build identifier, e.g. `21A559`.
    pub build_id: String,
    /// Build identifier read as hexadecimal.
    pub build_number: u64,
    /// Marketing version, e.g. `15.1`.
    pub version_number: String,
    /// Download page.
    pub download_url: Option<String>,
    /// Release notes page.
    pub release_notes_url: Option<String>,
}

impl Published for CatalogEntry {
    fn identifier(&self) -> &str {
        &self.build_id
    }

    fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        if let Some(url) = &self.download_url {
            links.push(Link {
                kind: LinkKind::Download,
                url: url.clone(),
            });
        }
        if let Some(url) = &self.release_notes_url {
            links.push(Link {
                kind: LinkKind::ReleaseNotes,
                url: url.clone(),
            });
        }
        links
    }
}

/// Parse a catalog body into final releases, in catalog order.
pub fn parse_catalog(body: &str) -> Result<Vec<CatalogEntry>> {
    let value: Value = serde_json::from_str(body).map_err(|e| UpgradeError::FeedParse {
        feed: FEED_NAME.to_string(),
        message: e.to_string(),
    })?;
    entries_from_value(&value)
}

/// Extract final releases from an already-parsed catalog.
pub fn entries_from_value(value: &Value) -> Result<Vec<CatalogEntry>> {
    let releases = value.as_array().ok_or_else(|| UpgradeError::FeedParse {
        feed: FEED_NAME.to_string(),
        message: "expected a JSON array".to_string(),
    })?;

    let entries: Vec<CatalogEntry> = releases.iter().filter_map(entry_from_release).collect();
    debug!(
        "{} of {} catalog entries are final releases",
        entries.len(),
        releases.len()
    );
    Ok(entries)
}

/// The newest final release in the catalog.
pub fn latest_release(body: &str) -> Result<CatalogEntry> {
    parse_catalog(body)?
        .into_iter()
        .next()
        .ok_or_else(|| UpgradeError::FeedParse {
            feed: FEED_NAME.to_string(),
            message: "no final release in catalog".to_string(),
        })
}

/// Convert one catalog element, or `None` if it is not a usable final release.
pub fn entry_from_release(release: &Value) -> Option<CatalogEntry> {
    let version = non_null(release.get("version"))?;
    let build_id = version.get("build")?.as_str()?;
    let version_number = version.get("number")?.as_str()?;
    let classification = non_null(version.get("release"))?;
    if classification.get("release")?.as_bool() != Some(true) {
        return None;
    }

    if build_id.is_empty() || version_number.is_empty() {
        return None;
    }

    let Some(build_number) = parse_build_number(build_id) else {
        debug!("Skipping catalog entry with non-hex build '{}'", build_id);
        return None;
    };

    let links = release.get("links");
    Some(CatalogEntry {
        build_id: build_id.to_string(),
        build_number,
        version_number: version_number.to_string(),
        download_url: link_url(links, "download"),
        release_notes_url: link_url(links, "notes"),
    })
}

/// Interpret a build identifier as base 16.
pub fn parse_build_number(build_id: &str) -> Option<u64> {
    if build_id.is_empty() || !build_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(build_id, 16).ok()
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn link_url(links: Option<&Value>, kind: &str) -> Option<String> {
    links?.get(kind)?.get("url")?.as_str().map(String::from)
}
