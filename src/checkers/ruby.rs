//! Ruby release freshness check.
//!
//! The installed version is whatever `ruby` on `PATH` reports; the latest is
//! the newest stable row of the ruby-lang.org release table.

use tracing::debug;

use crate::error::{Result, UpgradeError};
use crate::feeds::{Comparison, FeedClient, Release, ReleaseListParser};
use crate::shell::CommandExecutor;

use super::{report_comparison, report_check_failure, RunContext};

const COMPONENT: &str = "Ruby";

/// Prints the running interpreter's version with no trailing newline.
pub const RUBY_VERSION_COMMAND: &str = "ruby -e 'print RUBY_VERSION'";

/// Read the installed Ruby version.
pub fn installed_version(executor: &dyn CommandExecutor) -> Result<String> {
    executor
        .capture(RUBY_VERSION_COMMAND)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| UpgradeError::LocalVersion {
            component: COMPONENT.to_string(),
            message: format!("`{}` produced no version", RUBY_VERSION_COMMAND),
        })
}

/// Fetch the release page and pick the newest stable release.
pub fn fetch_latest(feeds: &dyn FeedClient, url: &str, link_prefix: &str) -> Result<Release> {
    debug!("Fetching Ruby releases from {}", url);
    let response = feeds.get(url)?.require_success(url)?;
    ReleaseListParser::new(link_prefix).latest(&response.text())
}

/// Run the Ruby check against `ctx`.
pub fn check(ctx: &mut RunContext<'_>) -> bool {
    let installed = match installed_version(ctx.executor) {
        Ok(version) => version,
        Err(e) => {
            report_check_failure(ctx.ui, COMPONENT, &e);
            return false;
        }
    };

    let feeds = &ctx.config.feeds;
    let mut spinner = ctx.ui.start_spinner("Fetching Ruby releases...");
    let latest = fetch_latest(ctx.feeds, &feeds.ruby_releases_url, &feeds.ruby_link_prefix);
    spinner.finish();

    match latest {
        Ok(release) => {
            debug!("Installed Ruby {}, latest {}", installed, release.version);
            report_comparison(ctx.ui, COMPONENT, &Comparison::new(installed, release));
            true
        }
        Err(e) => {
            report_check_failure(ctx.ui, COMPONENT, &e);
            false
        }
    }
}
