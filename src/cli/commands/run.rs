//! Run command implementation.
//!
//! The `upgrade-all run` command runs every applicable checker in order and
//! stops at the first failure.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::capability::{Host, SystemHost};
use crate::checkers::{builtin_checkers, RunContext};
use crate::cli::args::RunArgs;
use crate::config::UpgradeConfig;
use crate::error::Result;
use crate::feeds::{FeedClient, HttpFeedClient};
use crate::runner::{Orchestrator, RunState};
use crate::shell::{is_elevated, CommandExecutor, ShellExecutor};
use crate::ui::UserInterface;

use super::dispatcher::{load_for_command, Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Run the registry against explicit collaborators.
    pub fn run_with(
        &self,
        config: &UpgradeConfig,
        ui: &mut dyn UserInterface,
        executor: &dyn CommandExecutor,
        feeds: &dyn FeedClient,
        host: &dyn Host,
        elevated: bool,
    ) -> CommandResult {
        if self.args.dry_run {
            ui.message("Running in dry-run mode - no commands will be executed");
        }

        let mut orchestrator = Orchestrator::new(builtin_checkers(config));
        let mut ctx = RunContext {
            ui: &mut *ui,
            executor,
            feeds,
            host,
            config,
            elevated,
            dry_run: self.args.dry_run,
        };
        let summary = orchestrator.run(&mut ctx);

        debug!(
            "Run finished as {:?} in {:?}: {} ran, {} skipped",
            summary.state,
            summary.duration,
            summary.outcomes.len(),
            summary.skipped.len()
        );

        match summary.state {
            RunState::Aborted => {
                if let Some(id) = summary.first_failure() {
                    ui.error(&format!("Stopped after {} failed", id));
                }
                CommandResult::failure(summary.exit_code())
            }
            _ if summary.outcomes.is_empty() => {
                ui.message("Nothing to update on this machine");
                CommandResult::success()
            }
            _ => CommandResult::success(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_for_command(self.config_path.as_deref(), ui)? else {
            return Ok(CommandResult::failure(2));
        };

        let feeds = HttpFeedClient::with_timeout(Duration::from_secs(config.http.timeout_secs))?;
        let host = SystemHost::from_env();

        Ok(self.run_with(&config, ui, &ShellExecutor, &feeds, &host, is_elevated()))
    }
}
