//! Mock command executor for testing.
//!
//! `MockExecutor` records every command it is asked to run and answers
//! with pre-configured results, so checker and orchestration logic can be
//! exercised without touching the host.
//!
//! # Example
//!
//! ```
//! use upgrade_all::shell::{CommandExecutor, MockExecutor};
//!
//! let executor = MockExecutor::new();
//! executor.fail_on("brew upgrade");
//!
//! assert!(executor.run("brew update"));
//! assert!(!executor.run("brew upgrade"));
//! assert_eq!(executor.commands(), vec!["brew update", "brew upgrade"]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::CommandExecutor;

/// Command executor that records invocations instead of running them.
#[derive(Debug, Default)]
pub struct MockExecutor {
    commands: RefCell<Vec<String>>,
    failing: RefCell<HashSet<String>>,
    outputs: RefCell<HashMap<String, String>>,
}

impl MockExecutor {
    /// Create an executor where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` report failure when run or captured.
    pub fn fail_on(&self, command: &str) {
        self.failing.borrow_mut().insert(command.to_string());
    }

    /// Set the stdout returned when `command` is captured.
    pub fn set_output(&self, command: &str, output: &str) {
        self.outputs
            .borrow_mut()
            .insert(command.to_string(), output.to_string());
    }

    /// All commands received so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Whether `command` was received.
    pub fn ran(&self, command: &str) -> bool {
        self.commands.borrow().iter().any(|c| c == command)
    }
}

impl CommandExecutor for MockExecutor {
    fn run(&self, command: &str) -> bool {
        self.commands.borrow_mut().push(command.to_string());
        !self.failing.borrow().contains(command)
    }

    fn capture(&self, command: &str) -> Option<String> {
        self.commands.borrow_mut().push(command.to_string());
        if self.failing.borrow().contains(command) {
            return None;
        }
        self.outputs.borrow().get(command).cloned()
    }
}
