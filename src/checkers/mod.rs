//! Update checkers.
//!
//! A [`Checker`] is a plain value: identity, the [`Capability`] deciding
//! whether it applies to this host, and an [`Action`] describing what to do.
//! The full set lives in [`builtin::builtin_checkers`] in the order they run.
//!
//! Running a checker never returns an error. Every failure is shown to the
//! user and reported as `false`.
//!
//! # Modules
//!
//! - [`builtin`] - The fixed checker registry
//! - [`ruby`] - Ruby release freshness check
//! - [`xcode`] - Xcode release freshness check

pub mod builtin;
pub mod ruby;
pub mod xcode;

use tracing::warn;

use crate::capability::{resolve_first, Capability, Host};
use crate::config::UpgradeConfig;
use crate::error::UpgradeError;
use crate::feeds::{Comparison, FeedClient, Published};
use crate::shell::{privileged, CommandExecutor};
use crate::ui::UserInterface;

pub use builtin::builtin_checkers;

/// Everything a checker needs while running.
pub struct RunContext<'a> {
    /// Console output.
    pub ui: &'a mut dyn UserInterface,
    /// Runs package manager commands.
    pub executor: &'a dyn CommandExecutor,
    /// Fetches release feeds.
    pub feeds: &'a dyn FeedClient,
    /// Host facts, used to resolve executables.
    pub host: &'a dyn Host,
    /// Loaded configuration.
    pub config: &'a UpgradeConfig,
    /// Whether the process already runs as root.
    pub elevated: bool,
    /// Describe actions instead of performing them.
    pub dry_run: bool,
}

/// How a command step finds its program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// Invoke by name through the shell's `PATH` lookup.
    Named(&'static str),
    /// Use the full path of the first of these found on the host.
    FirstOf(&'static [&'static str]),
}

/// One command in a checker's sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    /// Program to run.
    pub program: Program,
    /// Arguments, as written on a command line.
    pub args: &'static str,
    /// Run through `sudo` unless already root.
    pub privileged: bool,
    /// Shown when the command fails.
    pub failure: &'static str,
}

impl CommandStep {
    /// A step running `program` by name.
    pub fn new(program: &'static str, args: &'static str, failure: &'static str) -> Self {
        Self {
            program: Program::Named(program),
            args,
            privileged: false,
            failure,
        }
    }

    /// Run this step through `sudo`.
    pub fn with_sudo(mut self) -> Self {
        self.privileged = true;
        self
    }

    /// Build the command line, or `None` if the program cannot be found.
    pub fn render(&self, host: &dyn Host, elevated: bool) -> Option<String> {
        let program = match &self.program {
            Program::Named(name) => (*name).to_string(),
            Program::FirstOf(names) => {
                let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
                resolve_first(host, &names)?.display().to_string()
            }
        };

        let command = if self.args.is_empty() {
            program
        } else {
            format!("{} {}", program, self.args)
        };

        Some(if self.privileged {
            privileged(&command, elevated)
        } else {
            command
        })
    }
}

/// What a checker does when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run commands in order, stopping at the first failure.
    Commands(Vec<CommandStep>),
    /// Compare the installed Ruby against the latest stable release.
    RubyRelease,
    /// Compare the installed Xcode build against the latest final release.
    XcodeRelease,
}

/// A named unit of update work.
#[derive(Debug, Clone)]
pub struct Checker {
    /// Stable identifier, e.g. `homebrew`.
    pub id: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Symbol shown next to the description.
    pub icon: &'static str,
    /// When this checker applies.
    pub capability: Capability,
    /// What it does.
    pub action: Action,
}

impl Checker {
    /// Whether this checker applies to `host`.
    pub fn is_applicable(&self, host: &dyn Host) -> bool {
        self.capability.is_met(host)
    }

    /// Run the checker, reporting progress through `ctx.ui`.
    pub fn run(&self, ctx: &mut RunContext<'_>) -> bool {
        if ctx.dry_run {
            self.describe(ctx);
            return true;
        }

        match &self.action {
            Action::Commands(steps) => self.run_commands(steps, ctx),
            Action::RubyRelease => ruby::check(ctx),
            Action::XcodeRelease => xcode::check(ctx),
        }
    }

    fn run_commands(&self, steps: &[CommandStep], ctx: &mut RunContext<'_>) -> bool {
        for step in steps {
            let Some(command) = step.render(ctx.host, ctx.elevated) else {
                warn!("{}: no executable found for {:?}", self.id, step.program);
                ctx.ui.error(step.failure);
                return false;
            };

            if !ctx.executor.run(&command) {
                warn!("{}: `{}` failed", self.id, command);
                ctx.ui.error(step.failure);
                return false;
            }
        }

        ctx.ui.success(&format!("{} complete", self.description));
        true
    }

    fn describe(&self, ctx: &mut RunContext<'_>) {
        match &self.action {
            Action::Commands(steps) => {
                for step in steps {
                    let command = step
                        .render(ctx.host, ctx.elevated)
                        .unwrap_or_else(|| format!("<missing> {}", step.args));
                    ctx.ui.message(&format!("  would run: {}", command));
                }
            }
            Action::RubyRelease => ctx.ui.message(&format!(
                "  would check {}",
                ctx.config.feeds.ruby_releases_url
            )),
            Action::XcodeRelease => ctx.ui.message(&format!(
                "  would check {}",
                ctx.config.feeds.xcode_releases_url
            )),
        }
    }
}

/// Show the outcome of a freshness comparison.
pub(crate) fn report_comparison<T: Published>(
    ui: &mut dyn UserInterface,
    component: &str,
    comparison: &Comparison<T>,
) {
    if comparison.is_current {
        ui.success(&format!("{} is up to date", component));
        return;
    }

    ui.warning(&format!(
        "{} is not up to date! (installed {}, latest {})",
        component,
        comparison.installed,
        comparison.latest.identifier()
    ));
    for link in comparison.update_links() {
        ui.link(link.kind.label(), &link.url);
    }
}

/// Show why a freshness check could not complete.
pub(crate) fn report_check_failure(
    ui: &mut dyn UserInterface,
    component: &str,
    error: &UpgradeError,
) {
    warn!("{} check failed: {}", component, error);
    let msg = match error {
        UpgradeError::FeedStatus { status, .. } => {
            format!("Failed to get {} versions: HTTP {}", component, status)
        }
        UpgradeError::FeedRequest { message, .. } => {
            format!("Failed to get {} versions: {}", component, message)
        }
        UpgradeError::FeedParse { message, .. } => {
            format!("Failed to parse {} versions: {}", component, message)
        }
        other => other.to_string(),
    };
    ui.error(&msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MockHost;
    use crate::feeds::MockFeedClient;
    use crate::shell::{MockExecutor, Platform};
    use crate::ui::MockUI;

    fn brew_checker() -> Checker {
        Checker {
            id: "homebrew",
            description: "Homebrew updates",
            icon: "🍻",
            capability: Capability::command("brew"),
            action: Action::Commands(vec![
                CommandStep::new("brew", "update", "Failed to update Homebrew"),
                CommandStep::new("brew", "upgrade", "Failed to upgrade Homebrew"),
                CommandStep::new("brew", "cleanup", "Failed to clean up Homebrew"),
            ]),
        }
    }

    struct Fixture {
        ui: MockUI,
        executor: MockExecutor,
        feeds: MockFeedClient,
        host: MockHost,
        config: UpgradeConfig,
    }

    impl Fixture {
        fn new(host: MockHost) -> Self {
            Self {
                ui: MockUI::new(),
                executor: MockExecutor::new(),
                feeds: MockFeedClient::new(),
                host,
                config: UpgradeConfig::default(),
            }
        }

        fn run(&mut self, checker: &Checker, elevated: bool, dry_run: bool) -> bool {
            let mut ctx = RunContext {
                ui: &mut self.ui,
                executor: &self.executor,
                feeds: &self.feeds,
                host: &self.host,
                config: &self.config,
                elevated,
                dry_run,
            };
            checker.run(&mut ctx)
        }
    }

    #[test]
    fn commands_run_in_order() {
        let mut fx = Fixture::new(MockHost::new(Platform::MacOS).with_executable("brew"));
        assert!(fx.run(&brew_checker(), false, false));
        assert_eq!(
            fx.executor.commands(),
            vec!["brew update", "brew upgrade", "brew cleanup"]
        );
        assert!(fx.ui.has_success("Homebrew updates complete"));
    }

    #[test]
    fn first_failing_command_stops_the_sequence() {
        let mut fx = Fixture::new(MockHost::new(Platform::MacOS).with_executable("brew"));
        fx.executor.fail_on("brew upgrade");

        assert!(!fx.run(&brew_checker(), false, false));
        assert!(!fx.executor.ran("brew cleanup"));
        assert!(fx.ui.has_error("Failed to upgrade Homebrew"));
        assert!(fx.ui.successes().is_empty());
    }

    #[test]
    fn dry_run_executes_nothing() {
        let mut fx = Fixture::new(MockHost::new(Platform::MacOS).with_executable("brew"));
        assert!(fx.run(&brew_checker(), false, true));
        assert!(fx.executor.commands().is_empty());
        assert!(fx.ui.has_message("would run: brew update"));
    }

    #[test]
    fn render_named_program() {
        let host = MockHost::new(Platform::Linux);
        let step = CommandStep::new("gem", "update --system", "x");
        assert_eq!(
            step.render(&host, false),
            Some("gem update --system".to_string())
        );
    }

    #[test]
    fn render_privileged_step() {
        let host = MockHost::new(Platform::Linux);
        let step = CommandStep::new("snap", "refresh", "x").with_sudo();
        assert_eq!(
            step.render(&host, false),
            Some("sudo snap refresh".to_string())
        );
        assert_eq!(step.render(&host, true), Some("snap refresh".to_string()));
    }

    #[test]
    fn render_first_of_uses_resolved_path() {
        let host = MockHost::new(Platform::Linux).with_executable("apt-get");
        let step = CommandStep {
            program: Program::FirstOf(&["apt", "apt-get"]),
            args: "update",
            privileged: true,
            failure: "x",
        };
        assert_eq!(
            step.render(&host, false),
            Some("sudo /usr/bin/apt-get update".to_string())
        );
    }

    #[test]
    fn unresolvable_program_fails_the_run() {
        let mut fx = Fixture::new(MockHost::new(Platform::Linux));
        let checker = Checker {
            id: "apt",
            description: "Apt updates",
            icon: "🍄",
            capability: Capability::Always,
            action: Action::Commands(vec![CommandStep {
                program: Program::FirstOf(&["apt", "apt-get"]),
                args: "update",
                privileged: true,
                failure: "Failed to update Apt",
            }]),
        };

        assert!(!fx.run(&checker, false, false));
        assert!(fx.executor.commands().is_empty());
        assert!(fx.ui.has_error("Failed to update Apt"));
    }

    #[test]
    fn applicability_follows_capability() {
        let checker = brew_checker();
        assert!(checker.is_applicable(&MockHost::new(Platform::Linux).with_executable("brew")));
        assert!(!checker.is_applicable(&MockHost::new(Platform::Linux)));
    }
}
