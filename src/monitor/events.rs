// src/monitor/events.rs

//! Structured status events emitted while a task is being monitored.
//!
//! The controller never prints; it hands events to an [`EventSink`]. The
//! binary uses [`TracingSink`], tests usually collect into a `Vec`.

use std::time::Duration;

use tracing::{info, warn};

use crate::backend::{DescribeFailure, TaskHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// The backend accepted the submission.
    Launched { handle: TaskHandle },
    /// A non-terminal status was observed.
    Status { last_status: String, elapsed: Duration },
    /// The backend could not describe the task this time. Not fatal.
    DescribeFailures {
        failures: Vec<DescribeFailure>,
        elapsed: Duration,
    },
    /// The task reached its terminal status.
    Stopped { last_status: String, elapsed: Duration },
}

pub trait EventSink {
    fn emit(&mut self, event: MonitorEvent);
}

impl EventSink for Vec<MonitorEvent> {
    fn emit(&mut self, event: MonitorEvent) {
        self.push(event);
    }
}

/// Renders events as `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Launched { handle } => {
                info!(task = %handle, "task launched");
            }
            MonitorEvent::Status {
                last_status,
                elapsed,
            } => {
                info!(
                    status = %last_status,
                    elapsed_secs = elapsed.as_secs(),
                    "LastStatus={last_status} TimeElapsed={elapsed:?}"
                );
            }
            MonitorEvent::DescribeFailures { failures, elapsed } => {
                let reasons: Vec<String> = failures.iter().map(ToString::to_string).collect();
                warn!(
                    ?reasons,
                    elapsed_secs = elapsed.as_secs(),
                    "task could not be described yet; retrying"
                );
            }
            MonitorEvent::Stopped {
                last_status,
                elapsed,
            } => {
                info!(
                    status = %last_status,
                    elapsed_secs = elapsed.as_secs(),
                    "LastStatus={last_status} TimeElapsed={elapsed:?}"
                );
            }
        }
    }
}
