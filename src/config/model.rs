// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Timeout used when neither the CLI nor the config file sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Region variable read from the environment.
pub const REGION_ENV_VAR: &str = "AWS_DEFAULT_REGION";

/// Unvalidated configuration, as read from a TOML file or assembled from
/// CLI flags.
///
/// ```toml
/// cluster = "batch"
/// taskdef = "nightly-report:3"
/// name = "app"
/// command = "bin/report --date today"
/// timeout = 900
/// region = "eu-west-1"
/// ```
///
/// Every key is optional here; required keys are enforced by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTaskConfig {
    pub cluster: Option<String>,

    #[serde(rename = "taskdef")]
    pub task_definition: Option<String>,

    /// Target container whose command is overridden.
    #[serde(rename = "name")]
    pub container_name: Option<String>,

    pub command: Option<String>,

    /// Timeout in whole seconds.
    pub timeout: Option<u64>,

    pub region: Option<String>,
}

impl RawTaskConfig {
    /// Layer holding only what the process environment provides.
    pub fn from_env() -> Self {
        Self {
            region: std::env::var(REGION_ENV_VAR)
                .ok()
                .filter(|r| !r.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Merge `upper` on top of `self`; values set in `upper` win.
    pub fn overlay(self, upper: RawTaskConfig) -> RawTaskConfig {
        RawTaskConfig {
            cluster: upper.cluster.or(self.cluster),
            task_definition: upper.task_definition.or(self.task_definition),
            container_name: upper.container_name.or(self.container_name),
            command: upper.command.or(self.command),
            timeout: upper.timeout.or(self.timeout),
            region: upper.region.or(self.region),
        }
    }
}

/// Validated, immutable launch configuration.
///
/// Only constructed through `TryFrom<RawTaskConfig>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    cluster: String,
    task_definition: String,
    container_name: String,
    command: String,
    timeout: Duration,
    region: Option<String>,
}

impl TaskConfig {
    pub(crate) fn new_unchecked(
        cluster: String,
        task_definition: String,
        container_name: String,
        command: String,
        timeout: Duration,
        region: Option<String>,
    ) -> Self {
        Self {
            cluster,
            task_definition,
            container_name,
            command,
            timeout,
            region,
        }
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn task_definition(&self) -> &str {
        &self.task_definition
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// The command override exactly as given (before tokenization).
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
