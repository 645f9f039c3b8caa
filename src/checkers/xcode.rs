//! Xcode release freshness check.
//!
//! Compares the `ProductBuildVersion` of the installed Xcode against the
//! first final release in the xcodereleases.com catalog.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, UpgradeError};
use crate::feeds::{latest_release, CatalogEntry, Comparison, FeedClient};

use super::{report_comparison, report_check_failure, RunContext};

const COMPONENT: &str = "Xcode";

#[derive(Debug, Deserialize)]
struct VersionPlist {
    #[serde(rename = "ProductBuildVersion")]
    product_build_version: String,
}

/// Read the installed build identifier from Xcode's `version.plist`.
pub fn installed_build(plist_path: &Path) -> Result<String> {
    let info: VersionPlist =
        plist::from_file(plist_path).map_err(|e| UpgradeError::LocalVersion {
            component: COMPONENT.to_string(),
            message: format!("{}: {}", plist_path.display(), e),
        })?;
    Ok(info.product_build_version)
}

/// Fetch the catalog and pick the latest final release.
pub fn fetch_latest(feeds: &dyn FeedClient, url: &str) -> Result<CatalogEntry> {
    debug!("Fetching Xcode releases from {}", url);
    let response = feeds.get(url)?.require_success(url)?;
    latest_release(&response.text())
}

/// Run the Xcode check against `ctx`.
pub fn check(ctx: &mut RunContext<'_>) -> bool {
    let installed = match installed_build(&ctx.config.xcode.version_plist) {
        Ok(build) => build,
        Err(e) => {
            report_check_failure(ctx.ui, COMPONENT, &e);
            return false;
        }
    };

    let mut spinner = ctx.ui.start_spinner("Fetching Xcode releases...");
    let latest = fetch_latest(ctx.feeds, &ctx.config.feeds.xcode_releases_url);
    spinner.finish();

    match latest {
        Ok(entry) => {
            debug!(
                "Installed Xcode build {}, latest {} ({})",
                installed, entry.build_id, entry.version_number
            );
            report_comparison(ctx.ui, COMPONENT, &Comparison::new(installed, entry));
            true
        }
        Err(e) => {
            report_check_failure(ctx.ui, COMPONENT, &e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MockHost;
    use crate::config::UpgradeConfig;
    use crate::feeds::MockFeedClient;
    use crate::shell::{MockExecutor, Platform};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const URL: &str = "https://xcodereleases.com/data.json";

    const CATALOG: &str = r#"[
        {"version": {"build": "21A559", "number": "15.1", "release": {"release": true}},
         "links": {"download": {"url": "https://download.example/15.1"},
                   "notes": {"url": "https://notes.example/15.1"}}},
        {"version": {"build": "", "number": "15.0", "release": {"release": true}}}
    ]"#;

    fn write_plist(dir: &TempDir, build: &str) -> std::path::PathBuf {
        let path = dir.path().join("version.plist");
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleShortVersionString</key>
	<string>15.1</string>
	<key>ProductBuildVersion</key>
	<string>{}</string>
</dict>
</plist>
"#,
            build
        );
        fs::write(&path, content).unwrap();
        path
    }

    fn run_check(config: &UpgradeConfig, feeds: &MockFeedClient, ui: &mut MockUI) -> bool {
        let executor = MockExecutor::new();
        let host = MockHost::new(Platform::MacOS);
        let mut ctx = RunContext {
            ui,
            executor: &executor,
            feeds,
            host: &host,
            config,
            elevated: false,
            dry_run: false,
        };
        check(&mut ctx)
    }

    #[test]
    fn reads_build_from_plist() {
        let temp = TempDir::new().unwrap();
        let path = write_plist(&temp, "21A559");
        assert_eq!(installed_build(&path).unwrap(), "21A559");
    }

    #[test]
    fn missing_plist_is_a_local_version_error() {
        let temp = TempDir::new().unwrap();
        let err = installed_build(&temp.path().join("absent.plist")).unwrap_err();
        assert!(matches!(err, UpgradeError::LocalVersion { .. }));
    }

    #[test]
    fn matching_build_is_current() {
        let temp = TempDir::new().unwrap();
        let mut config = UpgradeConfig::default();
        config.xcode.version_plist = write_plist(&temp, "21A559");
        let feeds = MockFeedClient::new().with_response(URL, 200, CATALOG);
        let mut ui = MockUI::new();

        assert!(run_check(&config, &feeds, &mut ui));
        assert!(ui.has_success("Xcode is up to date"));
        assert!(ui.warnings().is_empty());
        assert!(ui.links().is_empty());
    }

    #[test]
    fn older_build_warns_with_download_and_notes() {
        let temp = TempDir::new().unwrap();
        let mut config = UpgradeConfig::default();
        config.xcode.version_plist = write_plist(&temp, "15A240d");
        let feeds = MockFeedClient::new().with_response(URL, 200, CATALOG);
        let mut ui = MockUI::new();

        assert!(run_check(&config, &feeds, &mut ui));
        assert!(ui.has_warning("Xcode is not up to date!"));
        assert!(ui.has_link("https://download.example/15.1"));
        assert!(ui.has_link("https://notes.example/15.1"));
    }

    #[test]
    fn catalog_without_final_release_fails() {
        let temp = TempDir::new().unwrap();
        let mut config = UpgradeConfig::default();
        config.xcode.version_plist = write_plist(&temp, "21A559");
        let feeds = MockFeedClient::new().with_response(URL, 200, "[]");
        let mut ui = MockUI::new();

        assert!(!run_check(&config, &feeds, &mut ui));
        assert!(ui.has_error("Failed to parse Xcode versions"));
    }

    #[test]
    fn server_error_fails() {
        let temp = TempDir::new().unwrap();
        let mut config = UpgradeConfig::default();
        config.xcode.version_plist = write_plist(&temp, "21A559");
        let feeds = MockFeedClient::new().with_response(URL, 500, "oops");
        let mut ui = MockUI::new();

        assert!(!run_check(&config, &feeds, &mut ui));
        assert!(ui.has_error("HTTP 500"));
    }
}
