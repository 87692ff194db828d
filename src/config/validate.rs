// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{DEFAULT_TIMEOUT_SECS, RawTaskConfig, TaskConfig};
use crate::errors::{EcsRunError, Result};

impl TryFrom<RawTaskConfig> for TaskConfig {
    type Error = EcsRunError;

    fn try_from(raw: RawTaskConfig) -> std::result::Result<Self, Self::Error> {
        let cluster = required(raw.cluster, "--cluster")?;
        let task_definition = required(raw.task_definition, "-t/--taskdef")?;
        let container_name = required(raw.container_name, "-n/--name")?;
        let command = required(raw.command, "-c/--command")?;
        let timeout = validate_timeout(raw.timeout)?;

        Ok(TaskConfig::new_unchecked(
            cluster,
            task_definition,
            container_name,
            command,
            timeout,
            raw.region,
        ))
    }
}

/// An empty string counts as missing.
fn required(value: Option<String>, flag: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(EcsRunError::Config(format!("{flag} option is required."))),
    }
}

fn validate_timeout(timeout: Option<u64>) -> Result<Duration> {
    let secs = timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if secs == 0 {
        return Err(EcsRunError::Config(
            "--timeout must be >= 1 second (got 0)".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
