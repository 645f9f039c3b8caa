//! Checker orchestration.

pub mod orchestrator;

pub use orchestrator::{CheckerOutcome, Orchestrator, RunState, RunSummary};
