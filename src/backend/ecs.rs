// src/backend/ecs.rs

//! Amazon ECS backend built on `aws-sdk-ecs`.
//!
//! The network calls live in the `TaskBackend` impl; turning SDK outputs
//! and errors into this crate's types is done by the plain functions below.

use aws_config::BehaviorVersion;
use aws_sdk_ecs::Client as EcsClient;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ecs::operation::describe_tasks::DescribeTasksOutput as SdkDescribeTasksOutput;
use aws_sdk_ecs::operation::run_task::RunTaskOutput;
use aws_sdk_ecs::types::{ContainerOverride, Failure, Task, TaskOverride};
use tracing::debug;

use super::{
    BackendError, BackendErrorKind, BackendFuture, ContainerDetail, DescribeFailure,
    DescribeTasksOutput, Operation, SubmitTaskRequest, TaskBackend, TaskDescription, TaskHandle,
};

/// ECS backend used in production.
#[derive(Debug, Clone)]
pub struct EcsBackend {
    client: EcsClient,
}

impl EcsBackend {
    /// Build a client from the standard AWS environment.
    ///
    /// An explicit `region` wins over whatever the SDK's provider chain
    /// would resolve.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        debug!(region = ?sdk_config.region(), "loaded AWS configuration");

        Self {
            client: EcsClient::new(&sdk_config),
        }
    }
}

impl TaskBackend for EcsBackend {
    fn submit_task<'a>(
        &'a mut self,
        request: &'a SubmitTaskRequest,
    ) -> BackendFuture<'a, TaskHandle> {
        Box::pin(async move {
            let overrides = TaskOverride::builder()
                .container_overrides(
                    ContainerOverride::builder()
                        .name(&request.container_name)
                        .set_command(Some(request.command.clone()))
                        .build(),
                )
                .build();

            let output = self
                .client
                .run_task()
                .cluster(&request.cluster)
                .task_definition(&request.task_definition)
                .count(1)
                .overrides(overrides)
                .send()
                .await
                .map_err(|err| classify_sdk_error(Operation::SubmitTask, &err))?;

            handle_from_run_task(&output)
        })
    }

    fn describe_tasks<'a>(
        &'a mut self,
        cluster: &'a str,
        handle: &'a TaskHandle,
    ) -> BackendFuture<'a, DescribeTasksOutput> {
        Box::pin(async move {
            let output = self
                .client
                .describe_tasks()
                .cluster(cluster)
                .tasks(handle.as_str())
                .send()
                .await
                .map_err(|err| classify_sdk_error(Operation::DescribeTasks, &err))?;

            Ok(convert_describe_tasks(&output))
        })
    }
}

/// Handle of the first task in a `RunTask` answer.
///
/// ECS reports placement problems as `failures` on a successful response
/// with no task attached; that is turned into an `Other` error listing them.
fn handle_from_run_task(output: &RunTaskOutput) -> Result<TaskHandle, BackendError> {
    if let Some(arn) = output.tasks().first().and_then(Task::task_arn) {
        return Ok(TaskHandle::new(arn));
    }

    let reasons: Vec<String> = output
        .failures()
        .iter()
        .map(|f| convert_failure(f).to_string())
        .collect();
    let message = if reasons.is_empty() {
        "RunTask returned no task".to_string()
    } else {
        format!("RunTask returned no task: {}", reasons.join("; "))
    };
    Err(BackendError::new(BackendErrorKind::Other(None), message))
}

fn convert_describe_tasks(output: &SdkDescribeTasksOutput) -> DescribeTasksOutput {
    DescribeTasksOutput {
        tasks: output.tasks().iter().map(convert_task).collect(),
        failures: output.failures().iter().map(convert_failure).collect(),
    }
}

/// Works on `SdkError` as well as on a bare operation error.
fn classify_sdk_error<E>(operation: Operation, err: &E) -> BackendError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = match err.message() {
        Some(msg) => msg.to_string(),
        None => DisplayErrorContext(err).to_string(),
    };
    BackendError::from_code(operation, err.code(), message)
}

fn convert_task(task: &Task) -> TaskDescription {
    TaskDescription {
        task_arn: task.task_arn().unwrap_or_default().to_string(),
        last_status: task.last_status().map(str::to_string),
        stopped_reason: task.stopped_reason().map(str::to_string),
        containers: task
            .containers()
            .iter()
            .map(|c| ContainerDetail {
                name: c.name().unwrap_or_default().to_string(),
                last_status: c.last_status().map(str::to_string),
                exit_code: c.exit_code(),
                reason: c.reason().map(str::to_string),
            })
            .collect(),
    }
}

fn convert_failure(failure: &Failure) -> DescribeFailure {
    DescribeFailure {
        arn: failure.arn().map(str::to_string),
        reason: failure.reason().map(str::to_string),
        detail: failure.detail().map(str::to_string),
    }
}
