//! List command implementation.
//!
//! The `upgrade-all list` command shows the checker registry in run order.

use std::path::{Path, PathBuf};

use crate::capability::{Host, SystemHost};
use crate::checkers::{builtin_checkers, Checker};
use crate::cli::args::ListArgs;
use crate::config::UpgradeConfig;
use crate::error::Result;
use crate::runner::Orchestrator;
use crate::ui::UserInterface;

use super::dispatcher::{load_for_command, Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(config_path: Option<&Path>, args: ListArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Print the registry as seen from `host`.
    pub fn list_with(&self, config: &UpgradeConfig, host: &dyn Host, ui: &mut dyn UserInterface) {
        let orchestrator = Orchestrator::new(builtin_checkers(config));
        let applicable = orchestrator.applicable(host);
        let shown: Vec<&Checker> = if self.args.applicable {
            applicable.clone()
        } else {
            orchestrator.checkers().iter().collect()
        };

        for checker in shown {
            let status = if applicable.iter().any(|c| c.id == checker.id) {
                "applicable"
            } else {
                "skipped"
            };
            ui.message(&format!(
                "  {:<10} {} {} ({})",
                checker.id, checker.icon, checker.description, status
            ));
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_for_command(self.config_path.as_deref(), ui)? else {
            return Ok(CommandResult::failure(2));
        };

        self.list_with(&config, &SystemHost::from_env(), ui);
        Ok(CommandResult::success())
    }
}
