// src/monitor/mod.rs

//! Launch-and-monitor controller.
//!
//! Three stages, strictly in sequence on a single logical thread:
//! - [`launcher`] submits exactly one task and returns its handle
//! - [`poller`] describes that handle on a fixed cadence until it stops or
//!   the deadline passes
//! - [`classifier`] maps the final observation to a [`ProcessOutcome`]
//!
//! Status updates flow out through an [`EventSink`] (see [`events`]).
//! Nothing here exits the process: every failure is returned to the caller.

pub mod classifier;
pub mod events;
pub mod launcher;
pub mod poller;

use std::fmt;

use tracing::info;

use crate::backend::TaskBackend;
use crate::config::TaskConfig;
use crate::errors::Result;

pub use classifier::{Diagnostics, ProcessOutcome, classify, classify_poll};
pub use events::{EventSink, MonitorEvent, TracingSink};
pub use launcher::{launch, split_command};
pub use poller::{
    Deadline, PollOptions, PollResult, PollTarget, StatusSnapshot, TERMINAL_STATUS,
    TerminalSnapshot, poll,
};

/// Runs one task from submission to classified outcome.
pub struct Controller<B: TaskBackend> {
    backend: B,
    config: TaskConfig,
    options: PollOptions,
}

impl<B: TaskBackend> fmt::Debug for Controller<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: TaskBackend> Controller<B> {
    pub fn new(backend: B, config: TaskConfig) -> Self {
        Self {
            backend,
            config,
            options: PollOptions::default(),
        }
    }

    pub fn with_poll_options(mut self, options: PollOptions) -> Self {
        self.options = options;
        self
    }

    /// Launch, poll, classify.
    ///
    /// A timeout only ends local monitoring; the remote task is left running.
    pub async fn run<S>(&mut self, sink: &mut S) -> Result<ProcessOutcome>
    where
        S: EventSink + ?Sized,
    {
        let handle = launch(&mut self.backend, &self.config).await?;
        let deadline = Deadline::starting_now(self.config.timeout());
        sink.emit(MonitorEvent::Launched {
            handle: handle.clone(),
        });

        let target = PollTarget {
            cluster: self.config.cluster(),
            handle: &handle,
            container_name: self.config.container_name(),
        };
        let result = poll(&mut self.backend, target, &deadline, &self.options, sink).await?;

        let outcome = classify_poll(&result);
        info!(
            task = %handle,
            exit_code = outcome.exit_code(),
            success = outcome.is_success(),
            "monitoring finished"
        );
        Ok(outcome)
    }
}
