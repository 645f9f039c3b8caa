//! Ruby release table scraping.
//!
//! The Ruby downloads page lists every release in an HTML table marked with
//! the `release-list` class. [`ReleaseScanner`] walks the page line by line
//! through three states:
//!
//! ```text
//! Outside --(<table … release-list)--> InTable --(<tr)--> InRow
//!                                         ^                 |
//!                                         +-----(</tr>)-----+
//! InTable | InRow --(</table>)--> Done
//! ```
//!
//! Inside a row the version, date and link cells are expected in that order.
//! Each field is only looked for once every earlier field has been found, so
//! a row whose cells are out of order is misread rather than rejected.
//!
//! Dates are read with a fixed list of formats. A date cell in any other
//! format (`TBD`, `25/12/2023`) leaves the date unset, and because the link
//! is only looked for after the date, that row also ends up without a link.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, UpgradeError};

use super::version::{compare_versions, is_pre_release, Link, LinkKind, Published};

/// Class identifying the release table.
pub const RELEASE_LIST_MARKER: &str = "release-list";

const FEED_NAME: &str = "Ruby releases";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ruby (\d+\.\d+\.\d+)-?([^<]+)?").unwrap());
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<]+)").unwrap());
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%Y/%m/%d"];

/// One row of the release table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Dotted numeric version, e.g. `3.3.0`.
    pub version: String,
    /// Qualifier after the version, e.g. `preview1`.
    pub pre_release: Option<String>,
    /// Publication date.
    pub date: Option<NaiveDate>,
    /// Absolute URL from the row's first link.
    pub link: Option<String>,
}

impl Published for Release {
    fn identifier(&self) -> &str {
        &self.version
    }

    fn links(&self) -> Vec<Link> {
        self.link
            .iter()
            .map(|url| Link {
                kind: LinkKind::News,
                url: url.clone(),
            })
            .collect()
    }
}

/// Scanner position within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Before the release table.
    Outside,
    /// Inside the table, between rows.
    InTable,
    /// Inside a row.
    InRow,
    /// Past the end of the table; remaining lines are ignored.
    Done,
}

#[derive(Debug, Default)]
struct RowAccumulator {
    version: Option<(String, Option<String>)>,
    date: Option<NaiveDate>,
    link: Option<String>,
}

impl RowAccumulator {
    fn into_release(self) -> Option<Release> {
        let (version, pre_release) = self.version?;
        Some(Release {
            version,
            pre_release,
            date: self.date,
            link: self.link,
        })
    }
}

/// Line-driven state machine over the release page.
#[derive(Debug)]
pub struct ReleaseScanner<'a> {
    state: ScanState,
    row: RowAccumulator,
    releases: Vec<Release>,
    link_prefix: &'a str,
}

impl<'a> ReleaseScanner<'a> {
    /// Create a scanner; relative links are resolved against `link_prefix`.
    pub fn new(link_prefix: &'a str) -> Self {
        Self {
            state: ScanState::Outside,
            row: RowAccumulator::default(),
            releases: Vec::new(),
            link_prefix,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Rows collected so far, in page order.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Advance by one line of the document.
    pub fn feed_line(&mut self, line: &str) {
        match self.state {
            ScanState::Outside => {
                if line.contains("<table") && line.contains(RELEASE_LIST_MARKER) {
                    self.state = ScanState::InTable;
                }
            }
            ScanState::InTable | ScanState::InRow if line.contains("</table>") => {
                self.state = ScanState::Done;
            }
            ScanState::InTable | ScanState::InRow if line.contains("<tr") => {
                self.row = RowAccumulator::default();
                self.state = ScanState::InRow;
            }
            ScanState::InRow if line.contains("</tr>") => {
                // Header and separator rows have no cells we recognize
                if let Some(release) = std::mem::take(&mut self.row).into_release() {
                    self.releases.push(release);
                }
                self.state = ScanState::InTable;
            }
            ScanState::InRow => self.fill_field(line),
            ScanState::InTable | ScanState::Done => {}
        }
    }

    fn fill_field(&mut self, line: &str) {
        if self.row.version.is_none() {
            if let Some(caps) = VERSION_PATTERN.captures(line) {
                let qualifier = caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|q| !q.is_empty());
                self.row.version = Some((caps[1].to_string(), qualifier));
            }
        } else if self.row.date.is_none() {
            self.row.date = DATE_PATTERN
                .captures(line)
                .and_then(|caps| parse_release_date(&caps[1]));
        } else if self.row.link.is_none() {
            self.row.link = LINK_PATTERN
                .captures(line)
                .map(|caps| absolute_link(self.link_prefix, &caps[1]));
        }
    }

    /// Finish scanning, failing if the release table never appeared.
    pub fn finish(self) -> Result<Vec<Release>> {
        if self.state == ScanState::Outside {
            return Err(UpgradeError::FeedParse {
                feed: FEED_NAME.to_string(),
                message: format!("no <table> with class {}", RELEASE_LIST_MARKER),
            });
        }
        Ok(self.releases)
    }
}

/// Parses the release page into stable releases, newest first.
#[derive(Debug, Clone)]
pub struct ReleaseListParser {
    link_prefix: String,
}

impl ReleaseListParser {
    /// Create a parser resolving relative links against `link_prefix`.
    pub fn new(link_prefix: impl Into<String>) -> Self {
        Self {
            link_prefix: link_prefix.into(),
        }
    }

    /// Every row of the release table, in page order and unfiltered.
    pub fn scan(&self, body: &str) -> Result<Vec<Release>> {
        let mut scanner = ReleaseScanner::new(&self.link_prefix);
        for line in body.lines() {
            scanner.feed_line(line);
            if scanner.state() == ScanState::Done {
                break;
            }
        }
        scanner.finish()
    }

    /// Stable releases sorted by version, highest first.
    pub fn parse(&self, body: &str) -> Result<Vec<Release>> {
        let mut releases: Vec<Release> = self
            .scan(body)?
            .into_iter()
            .filter(|r| !is_pre_release(r.pre_release.as_deref()))
            .collect();

        if releases.is_empty() {
            return Err(UpgradeError::FeedParse {
                feed: FEED_NAME.to_string(),
                message: "release table has no stable releases".to_string(),
            });
        }

        releases.sort_by(|a, b| compare_versions(&b.version, &a.version));
        Ok(releases)
    }

    /// The newest stable release.
    pub fn latest(&self, body: &str) -> Result<Release> {
        let mut releases = self.parse(body)?;
        Ok(releases.swap_remove(0))
    }
}

/// Parse the visible text of a date cell.
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Resolve a site-relative `href` against `prefix`.
pub fn absolute_link(prefix: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let prefix = prefix.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", prefix, href)
    } else {
        format!("{}/{}", prefix, href)
    }
}
