//! Console output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use upgrade_all::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.announce("🍻", "Homebrew updates");
//! ui.success("Homebrew is up to date");
//! assert!(ui.has_success("up to date"));
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Introduce a checker before it runs.
    fn announce(&mut self, icon: &str, description: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a note that something was skipped.
    fn skipped(&mut self, msg: &str);

    /// Display a labelled URL.
    fn link(&mut self, label: &str, url: &str);

    /// Start a spinner for a blocking operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Stop and erase the spinner.
    fn finish(&mut self);
}
