// src/monitor/classifier.rs

//! Outcome classification.
//!
//! Pure functions from what the poller observed to what the process
//! reports. No IO, no clock.

use std::time::Duration;

use crate::backend::ContainerDetail;
use crate::monitor::poller::{PollResult, TerminalSnapshot};

/// Detail surfaced to the operator when a task did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub container: Option<ContainerDetail>,
    pub stopped_reason: Option<String>,
}

impl Diagnostics {
    fn from_terminal(terminal: &TerminalSnapshot) -> Self {
        Self {
            container: terminal.container().cloned(),
            stopped_reason: terminal.snapshot().stopped_reason.clone(),
        }
    }
}

/// Final, process-visible result of a monitored run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Container exited with 0.
    Success,
    /// Container exited with a non-zero code.
    Failed { exit_code: i32, detail: Diagnostics },
    /// Task stopped without the container reporting an exit code.
    Indeterminate { detail: Diagnostics },
    /// Deadline passed before the task stopped. The remote task keeps running.
    TimedOut { elapsed: Duration },
}

impl ProcessOutcome {
    /// Exit code for this process.
    ///
    /// A container's own code is propagated when it fits a process exit
    /// status (1..=255). Anything else becomes 1, since the OS would
    /// otherwise truncate e.g. 256 to 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessOutcome::Success => 0,
            ProcessOutcome::Failed { exit_code, .. } if (1..=255).contains(exit_code) => *exit_code,
            ProcessOutcome::Failed { .. } => 1,
            ProcessOutcome::Indeterminate { .. } | ProcessOutcome::TimedOut { .. } => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Success)
    }
}

pub fn classify(terminal: &TerminalSnapshot) -> ProcessOutcome {
    match terminal.exit_code() {
        None => ProcessOutcome::Indeterminate {
            detail: Diagnostics::from_terminal(terminal),
        },
        Some(0) => ProcessOutcome::Success,
        Some(code) => ProcessOutcome::Failed {
            exit_code: code,
            detail: Diagnostics::from_terminal(terminal),
        },
    }
}

/// Classify whatever the poller ended with, including a timeout.
pub fn classify_poll(result: &PollResult) -> ProcessOutcome {
    match result {
        PollResult::Terminal(terminal) => classify(terminal),
        PollResult::TimedOut { elapsed } => ProcessOutcome::TimedOut { elapsed: *elapsed },
    }
}
