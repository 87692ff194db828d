// src/monitor/launcher.rs

//! Task launcher: turns a validated config into exactly one remote task.

use tracing::{error, info};

use crate::backend::{SubmitTaskRequest, TaskBackend, TaskHandle};
use crate::config::TaskConfig;
use crate::errors::{EcsRunError, Result};

/// Split a command override on single spaces.
///
/// No trimming and no quoting: consecutive spaces yield empty tokens, which
/// are passed to the backend unchanged.
pub fn split_command(command: &str) -> Vec<String> {
    command.split(' ').map(str::to_string).collect()
}

impl SubmitTaskRequest {
    pub fn from_config(config: &TaskConfig) -> Self {
        Self {
            cluster: config.cluster().to_string(),
            task_definition: config.task_definition().to_string(),
            container_name: config.container_name().to_string(),
            command: split_command(config.command()),
        }
    }
}

/// Submit the task described by `config`.
///
/// Every call starts a new remote task. Backend rejections are returned as
/// [`EcsRunError::Launch`] and never retried.
pub async fn launch<B>(backend: &mut B, config: &TaskConfig) -> Result<TaskHandle>
where
    B: TaskBackend + ?Sized,
{
    let request = SubmitTaskRequest::from_config(config);
    info!(
        cluster = %request.cluster,
        taskdef = %request.task_definition,
        container = %request.container_name,
        command = ?request.command,
        "submitting task"
    );

    match backend.submit_task(&request).await {
        Ok(handle) => Ok(handle),
        Err(err) => {
            error!(kind = %err.kind, message = %err.message, "task submission rejected");
            Err(EcsRunError::Launch {
                kind: err.kind,
                message: err.message,
            })
        }
    }
}
