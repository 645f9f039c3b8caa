//! Version ordering and freshness comparison.

use std::cmp::Ordering;

/// Compare dotted version strings numerically.
///
/// Components are compared as integers when both parse, so `3.10.0` sorts
/// above `3.2.0`. Missing components count as `0`; non-numeric components
/// fall back to string comparison.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());

    for idx in 0..len {
        let a_seg = a_parts.get(idx).copied().unwrap_or("0");
        let b_seg = b_parts.get(idx).copied().unwrap_or("0");

        let ord = match (a_seg.parse::<u64>(), b_seg.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            _ => a_seg.cmp(b_seg),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

/// Whether a release qualifier marks a preview or release candidate.
///
/// Matching is by substring and case-sensitive. No qualifier is never excluded.
pub fn is_pre_release(qualifier: Option<&str>) -> bool {
    qualifier.is_some_and(|q| q.contains("preview") || q.contains("rc"))
}

/// What a link next to an outdated version points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    News,
    Download,
    ReleaseNotes,
}

impl LinkKind {
    /// Label shown before the URL.
    pub fn label(self) -> &'static str {
        match self {
            Self::News => "🔗 News",
            Self::Download => "🔗 Download",
            Self::ReleaseNotes => "📃 Release Notes",
        }
    }
}

/// A URL published alongside a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub url: String,
}

/// A release as published by a feed.
pub trait Published {
    /// The token compared against the installed version.
    fn identifier(&self) -> &str;

    /// Links worth showing when the installed version is behind.
    fn links(&self) -> Vec<Link>;
}

/// Installed version set against the latest published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison<T> {
    /// Version or build installed locally.
    pub installed: String,
    /// Latest published release.
    pub latest: T,
    /// Whether `installed` equals the latest identifier exactly.
    pub is_current: bool,
}

impl<T: Published> Comparison<T> {
    /// Compare by exact string equality, not semantic ordering.
    pub fn new(installed: impl Into<String>, latest: T) -> Self {
        let installed = installed.into();
        let is_current = installed == latest.identifier();
        Self {
            installed,
            latest,
            is_current,
        }
    }

    /// Links to show the user; empty when already current.
    pub fn update_links(&self) -> Vec<Link> {
        if self.is_current {
            Vec::new()
        } else {
            self.latest.links()
        }
    }
}
