//! End-to-end runs against fake package managers on a private `PATH`.
#![cfg(unix)]
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("bin")).unwrap();
        Self { root }
    }

    fn bin(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    fn log(&self) -> PathBuf {
        self.root.path().join("commands.log")
    }

    /// Install a fake tool that logs its arguments and exits with `code`.
    fn tool(&self, name: &str, code: i32) {
        self.script(
            name,
            &format!("echo \"{} $*\" >> \"{}\"\nexit {}\n", name, self.log().display(), code),
        );
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.bin().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn config(&self, extra: &str) -> PathBuf {
        let path = self.root.path().join("config.yml");
        let missing = self.root.path().join("NoXcode.app");
        fs::write(
            &path,
            format!("xcode:\n  app_path: {}\n{}", missing.display(), extra),
        )
        .unwrap();
        path
    }

    fn logged(&self) -> String {
        fs::read_to_string(self.log()).unwrap_or_default()
    }

    fn command(&self, config: &Path) -> Command {
        let mut cmd = Command::new(cargo_bin("upgrade-all"));
        cmd.env("PATH", self.bin())
            .env("HOME", self.root.path())
            .env("NO_COLOR", "1")
            .env_remove("UPGRADE_ALL_CONFIG")
            .arg("--config")
            .arg(config);
        cmd
    }
}

#[test]
fn runs_applicable_tools_in_order() {
    let sandbox = Sandbox::new();
    sandbox.tool("gem", 0);
    sandbox.tool("rustup", 0);
    let config = sandbox.config("");

    sandbox
        .command(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust updates complete"));

    assert_eq!(
        sandbox.logged(),
        "gem update --system\ngem update\nrustup self update\nrustup update\n"
    );
}

#[test]
fn failure_aborts_later_checkers() {
    let sandbox = Sandbox::new();
    sandbox.tool("gem", 1);
    sandbox.tool("rustup", 0);
    let config = sandbox.config("");

    sandbox
        .command(&config)
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to update Ruby Gem system"));

    assert!(!sandbox.logged().contains("rustup"));
}

#[test]
fn nothing_applicable_exits_zero() {
    let sandbox = Sandbox::new();
    let config = sandbox.config("");

    sandbox
        .command(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to update"));
}

#[test]
fn dry_run_touches_nothing() {
    let sandbox = Sandbox::new();
    sandbox.tool("rustup", 0);
    let config = sandbox.config("");

    sandbox
        .command(&config)
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would run: rustup self update"));

    assert!(sandbox.logged().is_empty());
}

#[test]
fn ruby_feed_outage_aborts_the_run() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/releases/");
        then.status(503);
    });

    let sandbox = Sandbox::new();
    sandbox.script("ruby", "printf '3.2.2'\n");
    sandbox.tool("gem", 0);
    let config = sandbox.config(&format!(
        "feeds:\n  ruby_releases_url: {}\n",
        server.url("/releases/")
    ));

    sandbox
        .command(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to get Ruby versions: HTTP 503"));

    mock.assert();
    assert!(sandbox.logged().is_empty());
}

#[test]
fn outdated_ruby_shows_news_link() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/releases/");
        then.status(200).body(
            "<table class=\"release-list\">\n<tr>\n<td>Ruby 3.3.1</td>\n<td>2024-04-23</td>\n<td><a href=\"/en/news/331/\">more</a></td>\n</tr>\n</table>\n",
        );
    });

    let sandbox = Sandbox::new();
    sandbox.script("ruby", "printf '3.2.2'\n");
    let config = sandbox.config(&format!(
        "feeds:\n  ruby_releases_url: {}\n  ruby_link_prefix: https://www.ruby-lang.org\n",
        server.url("/releases/")
    ));

    sandbox
        .command(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ruby is not up to date!"))
        .stdout(predicate::str::contains(
            "https://www.ruby-lang.org/en/news/331/",
        ));
}
