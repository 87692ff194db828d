// src/monitor/poller.rs

//! Status poller: fixed-cadence `DescribeTasks` loop bounded by a deadline.
//!
//! Loop shape, per iteration:
//! 1. stop with `TimedOut` if the deadline has been reached
//! 2. describe the task; an API error aborts the run
//! 3. a `failures` answer is logged and skipped
//! 4. a non-terminal status is reported and skipped
//! 5. a terminal status is returned immediately
//! 6. sleep `interval`
//!
//! The deadline is only checked at the top of the loop, so a query that
//! starts just before the deadline is still honoured.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error};

use crate::backend::{ContainerDetail, TaskBackend, TaskDescription, TaskHandle};
use crate::errors::{EcsRunError, Result};
use crate::monitor::events::{EventSink, MonitorEvent};

/// Lifecycle status after which a task never transitions again.
pub const TERMINAL_STATUS: &str = "STOPPED";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Pause between two describe calls. Fixed; no backoff.
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// `start + timeout`, fixed when the task is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    started_at: Instant,
    expires_at: Instant,
}

impl Deadline {
    pub fn starting_now(timeout: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            expires_at: started_at + timeout,
        }
    }

    pub fn is_reached(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Time since launch. Reporting only.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Point-in-time view of the monitored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub last_status: String,
    pub stopped_reason: Option<String>,
    /// The target container, if the backend reported any container.
    pub container: Option<ContainerDetail>,
    pub elapsed: Duration,
}

impl StatusSnapshot {
    /// Build a snapshot, picking the container named `container_name` or
    /// else the first one reported.
    pub fn from_description(
        task: &TaskDescription,
        container_name: &str,
        elapsed: Duration,
    ) -> Self {
        let container = task
            .containers
            .iter()
            .find(|c| c.name == container_name)
            .or_else(|| task.containers.first())
            .cloned();

        Self {
            last_status: task
                .last_status
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            stopped_reason: task.stopped_reason.clone(),
            container,
            elapsed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.last_status == TERMINAL_STATUS
    }

    /// Promote to a [`TerminalSnapshot`], or hand the snapshot back if the
    /// task is still live.
    pub fn into_terminal(self) -> std::result::Result<TerminalSnapshot, StatusSnapshot> {
        if self.is_terminal() {
            Ok(TerminalSnapshot(self))
        } else {
            Err(self)
        }
    }
}

/// A snapshot whose status is known to be terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSnapshot(StatusSnapshot);

impl TerminalSnapshot {
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.0
    }

    pub fn container(&self) -> Option<&ContainerDetail> {
        self.0.container.as_ref()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.0.container.as_ref().and_then(|c| c.exit_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    Terminal(TerminalSnapshot),
    TimedOut { elapsed: Duration },
}

/// What is being polled.
#[derive(Debug, Clone, Copy)]
pub struct PollTarget<'a> {
    pub cluster: &'a str,
    pub handle: &'a TaskHandle,
    pub container_name: &'a str,
}

/// Poll `target` until it stops or `deadline` is reached.
pub async fn poll<B, S>(
    backend: &mut B,
    target: PollTarget<'_>,
    deadline: &Deadline,
    options: &PollOptions,
    sink: &mut S,
) -> Result<PollResult>
where
    B: TaskBackend + ?Sized,
    S: EventSink + ?Sized,
{
    while !deadline.is_reached() {
        let output = backend
            .describe_tasks(target.cluster, target.handle)
            .await
            .map_err(|err| {
                error!(
                    task = %target.handle,
                    kind = %err.kind,
                    message = %err.message,
                    "describing task failed"
                );
                EcsRunError::Poll {
                    kind: err.kind,
                    message: err.message,
                }
            })?;
        let elapsed = deadline.elapsed();

        let task = output
            .tasks
            .iter()
            .find(|t| t.task_arn == target.handle.as_str())
            .or_else(|| output.tasks.first());

        match task {
            Some(task) if output.failures.is_empty() => {
                let snapshot = StatusSnapshot::from_description(task, target.container_name, elapsed);
                match snapshot.into_terminal() {
                    Ok(terminal) => {
                        sink.emit(MonitorEvent::Stopped {
                            last_status: terminal.snapshot().last_status.clone(),
                            elapsed,
                        });
                        return Ok(PollResult::Terminal(terminal));
                    }
                    Err(snapshot) => {
                        sink.emit(MonitorEvent::Status {
                            last_status: snapshot.last_status,
                            elapsed,
                        });
                    }
                }
            }
            // Failures reported, or an empty answer: eventual consistency
            // right after launch. Wait for the next tick.
            _ => {
                sink.emit(MonitorEvent::DescribeFailures {
                    failures: output.failures,
                    elapsed,
                });
            }
        }

        debug!(interval = ?options.interval, "sleeping before next describe");
        tokio::time::sleep(options.interval).await;
    }

    Ok(PollResult::TimedOut {
        elapsed: deadline.elapsed(),
    })
}
