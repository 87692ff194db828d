#![allow(dead_code)]

use ecsrun::config::{RawTaskConfig, TaskConfig};

/// Builder for `TaskConfig` to simplify test setup.
///
/// Starts from the canonical `c1` / `td1` / `app` / `"run job"` / 10s
/// configuration used throughout the tests.
pub struct TaskConfigBuilder {
    raw: RawTaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawTaskConfig {
                cluster: Some("c1".to_string()),
                task_definition: Some("td1".to_string()),
                container_name: Some("app".to_string()),
                command: Some("run job".to_string()),
                timeout: Some(10),
                region: None,
            },
        }
    }

    pub fn cluster(mut self, cluster: &str) -> Self {
        self.raw.cluster = Some(cluster.to_string());
        self
    }

    pub fn task_definition(mut self, taskdef: &str) -> Self {
        self.raw.task_definition = Some(taskdef.to_string());
        self
    }

    pub fn container_name(mut self, name: &str) -> Self {
        self.raw.container_name = Some(name.to_string());
        self
    }

    pub fn command(mut self, command: &str) -> Self {
        self.raw.command = Some(command.to_string());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.raw.timeout = Some(secs);
        self
    }

    pub fn raw(self) -> RawTaskConfig {
        self.raw
    }

    pub fn build(self) -> TaskConfig {
        TaskConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
