//! Shell command execution and platform facts.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandExecutor, CommandOptions, CommandResult, ShellExecutor};
pub use mock::MockExecutor;
pub use platform::{is_ci, is_elevated, privileged, Platform};
