//! Sequential fail-fast orchestration.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::capability::Host;
use crate::checkers::{Checker, RunContext};

/// Lifecycle of one orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started.
    Pending,
    /// Checkers are running.
    Running,
    /// Every applicable checker succeeded, or none applied.
    Completed,
    /// A checker failed; the rest were not run.
    Aborted,
}

/// Result of one checker that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOutcome {
    /// Checker id.
    pub id: &'static str,
    /// Whether its run succeeded.
    pub succeeded: bool,
}

/// Result of running the registry.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Final state, either `Completed` or `Aborted`.
    pub state: RunState,
    /// Outcomes of checkers that ran, in order.
    pub outcomes: Vec<CheckerOutcome>,
    /// Ids of checkers that did not apply to this host.
    pub skipped: Vec<&'static str>,
    /// Total duration.
    pub duration: Duration,
}

impl RunSummary {
    /// Whether every checker that ran succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.state == RunState::Completed
    }

    /// Id of the checker that aborted the run.
    pub fn first_failure(&self) -> Option<&'static str> {
        self.outcomes.iter().find(|o| !o.succeeded).map(|o| o.id)
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

/// Runs an ordered registry of checkers, stopping at the first failure.
pub struct Orchestrator {
    registry: Vec<Checker>,
    state: RunState,
}

impl Orchestrator {
    /// Create an orchestrator over `registry`, run in the given order.
    pub fn new(registry: Vec<Checker>) -> Self {
        Self {
            registry,
            state: RunState::Pending,
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The registry, in run order.
    pub fn checkers(&self) -> &[Checker] {
        &self.registry
    }

    /// Checkers that apply to `host`, in run order.
    pub fn applicable<'a>(&'a self, host: &dyn Host) -> Vec<&'a Checker> {
        self.registry
            .iter()
            .filter(|c| c.is_applicable(host))
            .collect()
    }

    /// Run every applicable checker in order.
    pub fn run(&mut self, ctx: &mut RunContext<'_>) -> RunSummary {
        let start = Instant::now();
        self.state = RunState::Running;

        let mut outcomes = Vec::new();
        let mut skipped = Vec::new();

        for checker in &self.registry {
            if !checker.is_applicable(ctx.host) {
                debug!("Skipping {}: not applicable", checker.id);
                ctx.ui.skipped(checker.description);
                skipped.push(checker.id);
                continue;
            }

            ctx.ui.announce(checker.icon, checker.description);
            let succeeded = checker.run(ctx);
            outcomes.push(CheckerOutcome {
                id: checker.id,
                succeeded,
            });

            if !succeeded {
                warn!("{} failed; aborting remaining checkers", checker.id);
                self.state = RunState::Aborted;
                break;
            }
        }

        if self.state == RunState::Running {
            self.state = RunState::Completed;
        }

        RunSummary {
            state: self.state,
            outcomes,
            skipped,
            duration: start.elapsed(),
        }
    }
}
