// src/backend/mod.rs

//! Execution backend abstraction.
//!
//! The controller talks to a `TaskBackend` instead of a concrete SDK client.
//! This makes it easy to swap in a scripted backend in tests while keeping
//! the production implementation in [`ecs`].
//!
//! - [`EcsBackend`] is the implementation used by `ecsrun`. It wraps an
//!   `aws-sdk-ecs` client and maps `RunTask` / `DescribeTasks` into the
//!   plain types below.
//! - [`error`] holds the error classification shared by both operations.

pub mod ecs;
pub mod error;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub use ecs::EcsBackend;
pub use error::{BackendError, BackendErrorKind, Operation};

/// Boxed future returned by backend operations.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = std::result::Result<T, BackendError>> + Send + 'a>>;

/// Opaque identifier assigned by the backend to a launched task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to start exactly one task with one container's
/// command overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTaskRequest {
    pub cluster: String,
    pub task_definition: String,
    pub container_name: String,
    pub command: Vec<String>,
}

/// Result of a `DescribeTasks` call.
///
/// `failures` is not an error: the backend may be unable to describe a
/// freshly launched handle for a short while.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeTasksOutput {
    pub tasks: Vec<TaskDescription>,
    pub failures: Vec<DescribeFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDescription {
    pub task_arn: String,
    pub last_status: Option<String>,
    pub stopped_reason: Option<String>,
    pub containers: Vec<ContainerDetail>,
}

/// Per-container state reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDetail {
    pub name: String,
    pub last_status: Option<String>,
    /// `None` when the container never produced an exit code (never
    /// started, or killed by the platform).
    pub exit_code: Option<i32>,
    pub reason: Option<String>,
}

impl fmt::Display for ContainerDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container={}", self.name)?;
        if let Some(ref status) = self.last_status {
            write!(f, " last_status={status}")?;
        }
        match self.exit_code {
            Some(code) => write!(f, " exit_code={code}")?,
            None => write!(f, " exit_code=<none>")?,
        }
        if let Some(ref reason) = self.reason {
            write!(f, " reason={reason:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeFailure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl fmt::Display for DescribeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason.as_deref().unwrap_or("unknown reason"))?;
        if let Some(ref arn) = self.arn {
            write!(f, " ({arn})")?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Trait abstracting the two remote operations the controller needs.
///
/// Production code uses [`EcsBackend`]; tests provide their own
/// implementation that replays scripted responses.
pub trait TaskBackend: Send {
    /// Start one task instance. Not idempotent.
    fn submit_task<'a>(&'a mut self, request: &'a SubmitTaskRequest)
    -> BackendFuture<'a, TaskHandle>;

    /// Read the current state of a single task.
    fn describe_tasks<'a>(
        &'a mut self,
        cluster: &'a str,
        handle: &'a TaskHandle,
    ) -> BackendFuture<'a, DescribeTasksOutput>;
}
