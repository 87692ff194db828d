use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use ecsrun::backend::{
    BackendError, BackendFuture, ContainerDetail, DescribeFailure, DescribeTasksOutput,
    SubmitTaskRequest, TaskBackend, TaskDescription, TaskHandle,
};

type DescribeResponse = Result<DescribeTasksOutput, BackendError>;

/// Everything a [`ScriptedBackend`] was asked to do.
#[derive(Debug, Default)]
pub struct CallLog {
    pub submissions: Vec<SubmitTaskRequest>,
    /// `(cluster, handle, when)` for every describe call.
    pub describes: Vec<(String, TaskHandle, Instant)>,
}

/// A fake backend that:
/// - records submissions and describe calls
/// - answers submissions with a fixed handle (or a scripted error)
/// - replays scripted describe responses in order, repeating the last one
///   once the script runs out.
pub struct ScriptedBackend {
    submit: Result<TaskHandle, BackendError>,
    describes: VecDeque<DescribeResponse>,
    last: Option<DescribeResponse>,
    log: Arc<Mutex<CallLog>>,
}

impl ScriptedBackend {
    pub fn new(handle: &str) -> Self {
        Self {
            submit: Ok(TaskHandle::new(handle)),
            describes: VecDeque::new(),
            last: None,
            log: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    pub fn rejecting_submit(err: BackendError) -> Self {
        Self {
            submit: Err(err),
            ..Self::new("unused")
        }
    }

    pub fn then(mut self, response: DescribeResponse) -> Self {
        self.describes.push_back(response);
        self
    }

    /// Shared handle on the call log; stays valid after the backend is
    /// moved into a controller.
    pub fn log(&self) -> Arc<Mutex<CallLog>> {
        Arc::clone(&self.log)
    }
}

impl TaskBackend for ScriptedBackend {
    fn submit_task<'a>(
        &'a mut self,
        request: &'a SubmitTaskRequest,
    ) -> BackendFuture<'a, TaskHandle> {
        let log = Arc::clone(&self.log);
        let result = self.submit.clone();

        Box::pin(async move {
            {
                let mut guard = log.lock().unwrap();
                guard.submissions.push(request.clone());
            }
            result
        })
    }

    fn describe_tasks<'a>(
        &'a mut self,
        cluster: &'a str,
        handle: &'a TaskHandle,
    ) -> BackendFuture<'a, DescribeTasksOutput> {
        let response = match self.describes.pop_front() {
            Some(next) => {
                self.last = Some(next.clone());
                next
            }
            None => self
                .last
                .clone()
                .unwrap_or_else(|| Ok(running(handle.as_str()))),
        };
        let log = Arc::clone(&self.log);

        Box::pin(async move {
            {
                let mut guard = log.lock().unwrap();
                guard
                    .describes
                    .push((cluster.to_string(), handle.clone(), Instant::now()));
            }
            response
        })
    }
}

/// A single task in `status` with an `app` container.
pub fn with_status(handle: &str, status: &str, exit_code: Option<i32>) -> DescribeTasksOutput {
    DescribeTasksOutput {
        tasks: vec![TaskDescription {
            task_arn: handle.to_string(),
            last_status: Some(status.to_string()),
            stopped_reason: None,
            containers: vec![ContainerDetail {
                name: "app".to_string(),
                last_status: Some(status.to_string()),
                exit_code,
                reason: None,
            }],
        }],
        failures: Vec::new(),
    }
}

pub fn running(handle: &str) -> DescribeTasksOutput {
    with_status(handle, "RUNNING", None)
}

pub fn stopped(handle: &str, exit_code: Option<i32>) -> DescribeTasksOutput {
    with_status(handle, "STOPPED", exit_code)
}

/// The backend could not describe `handle` yet.
pub fn missing(handle: &str) -> DescribeTasksOutput {
    DescribeTasksOutput {
        tasks: Vec::new(),
        failures: vec![DescribeFailure {
            arn: Some(handle.to_string()),
            reason: Some("MISSING".to_string()),
            detail: None,
        }],
    }
}
