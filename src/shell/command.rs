//! Shell command execution.

use crate::error::{Result, UpgradeError};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output, when captured.
    pub stdout: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,
}

/// Runs command lines on behalf of checkers.
///
/// Implementations must never fail loudly: a command that cannot be launched
/// is reported the same way as one that exits non-zero.
pub trait CommandExecutor {
    /// Run a command with inherited stdio, returning whether it exited 0.
    fn run(&self, command: &str) -> bool;

    /// Run a command and return its trimmed stdout if it exited 0.
    fn capture(&self, command: &str) -> Option<String>;
}

/// Executes commands through the user's shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn run(&self, command: &str) -> bool {
        match execute(command, &CommandOptions::default()) {
            Ok(result) => {
                debug!(
                    "`{}` exited with {:?} after {:?}",
                    command, result.exit_code, result.duration
                );
                result.success
            }
            Err(e) => {
                debug!("{}", e);
                false
            }
        }
    }

    fn capture(&self, command: &str) -> Option<String> {
        let options = CommandOptions {
            capture_stdout: true,
        };
        execute(command, &options)
            .ok()
            .filter(|r| r.success)
            .map(|r| r.stdout.trim().to_string())
    }
}

/// Execute a shell command.
///
/// Stdin and stderr are always inherited so that tools like `sudo` can
/// prompt the user.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = detect_shell();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);
    cmd.stdin(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        UpgradeError::Other(anyhow::anyhow!(
            "Failed to launch `{}` via {}: {}",
            command,
            shell,
            e
        ))
    })?;

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout,
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Detect the shell used to interpret command lines.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Get the flag to pass commands to the shell.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
