//! Remote release feeds and version comparison.
//!
//! # Modules
//!
//! - [`client`] - Blocking HTTP access to feeds
//! - [`release_list`] - Ruby release table scraping
//! - [`build_catalog`] - Xcode JSON release catalog
//! - [`version`] - Version ordering and installed-vs-latest comparison
//! - [`mock`] - Canned feed client for tests

pub mod build_catalog;
pub mod client;
pub mod mock;
pub mod release_list;
pub mod version;

pub use build_catalog::{latest_release, parse_catalog, CatalogEntry};
pub use client::{FeedClient, FeedResponse, HttpFeedClient};
pub use mock::MockFeedClient;
pub use release_list::{Release, ReleaseListParser, ReleaseScanner, ScanState};
pub use version::{compare_versions, is_pre_release, Comparison, Link, LinkKind, Published};
