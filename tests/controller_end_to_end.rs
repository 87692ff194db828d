// tests/controller_end_to_end.rs

mod common;
use crate::common::builders::TaskConfigBuilder;
use crate::common::init_tracing;
use crate::common::scripted_backend::{ScriptedBackend, missing, running, stopped};

use std::error::Error;
use std::time::Duration;

use ecsrun::backend::{BackendError, BackendErrorKind, DescribeTasksOutput, Operation};
use ecsrun::errors::EcsRunError;
use ecsrun::monitor::{Controller, MonitorEvent, PollOptions, ProcessOutcome};

type TestResult = Result<(), Box<dyn Error>>;

const HANDLE: &str = "task-123";

#[tokio::test(start_paused = true)]
async fn running_then_stopped_zero_is_success() -> TestResult {
    init_tracing();

    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(running(HANDLE)))
        .then(Ok(stopped(HANDLE, Some(0))));
    let log = backend.log();

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let mut events: Vec<MonitorEvent> = Vec::new();
    let outcome = controller.run(&mut events).await?;

    assert_eq!(outcome, ProcessOutcome::Success);
    assert_eq!(outcome.exit_code(), 0);

    let log = log.lock().unwrap();
    assert_eq!(log.submissions.len(), 1);
    assert_eq!(log.submissions[0].cluster, "c1");
    assert_eq!(log.submissions[0].task_definition, "td1");
    assert_eq!(log.submissions[0].container_name, "app");
    assert_eq!(log.submissions[0].command, vec!["run", "job"]);

    assert_eq!(log.describes.len(), 2);
    assert_eq!(log.describes[0].0, "c1");
    assert_eq!(log.describes[0].1.as_str(), HANDLE);
    assert_eq!(log.describes[1].2 - log.describes[0].2, Duration::from_secs(5));

    assert_eq!(events.len(), 3);
    assert!(matches!(
        events[0],
        MonitorEvent::Launched { ref handle } if handle.as_str() == HANDLE
    ));
    assert!(matches!(
        events[1],
        MonitorEvent::Status { ref last_status, .. } if last_status == "RUNNING"
    ));
    assert!(matches!(
        events[2],
        MonitorEvent::Stopped { ref last_status, elapsed }
            if last_status == "STOPPED" && elapsed == Duration::from_secs(5)
    ));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stopped_with_137_propagates_exit_code() -> TestResult {
    init_tracing();

    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(running(HANDLE)))
        .then(Ok(stopped(HANDLE, Some(137))));

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let outcome = controller.run(&mut Vec::<MonitorEvent>::new()).await?;

    assert!(matches!(outcome, ProcessOutcome::Failed { exit_code: 137, .. }));
    assert_eq!(outcome.exit_code(), 137);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stopped_without_exit_code_is_indeterminate() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE).then(Ok(stopped(HANDLE, None)));

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let outcome = controller.run(&mut Vec::<MonitorEvent>::new()).await?;

    assert!(matches!(outcome, ProcessOutcome::Indeterminate { .. }));
    assert_eq!(outcome.exit_code(), 1);

    Ok(())
}

/// Deadline is checked at the top of each iteration: with a 10s timeout and
/// a 5s cadence the task is described at t=0 and t=5 only.
#[tokio::test(start_paused = true)]
async fn never_stopping_task_times_out_after_two_describes() -> TestResult {
    init_tracing();

    let backend = ScriptedBackend::new(HANDLE).then(Ok(running(HANDLE)));
    let log = backend.log();

    let config = TaskConfigBuilder::new().timeout_secs(10).build();
    let mut controller = Controller::new(backend, config);
    let mut events: Vec<MonitorEvent> = Vec::new();
    let outcome = controller.run(&mut events).await?;

    assert_eq!(
        outcome,
        ProcessOutcome::TimedOut {
            elapsed: Duration::from_secs(10)
        }
    );
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(log.lock().unwrap().describes.len(), 2);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, MonitorEvent::Stopped { .. })),
        "a timed out run must never report a terminal status"
    );

    Ok(())
}

/// A describe that starts before the deadline is honoured even though the
/// following sleep would cross it.
#[tokio::test(start_paused = true)]
async fn describe_started_before_deadline_counts() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(running(HANDLE)))
        .then(Ok(running(HANDLE)))
        .then(Ok(stopped(HANDLE, Some(0))));
    let log = backend.log();

    let config = TaskConfigBuilder::new().timeout_secs(12).build();
    let mut controller = Controller::new(backend, config);
    let outcome = controller.run(&mut Vec::<MonitorEvent>::new()).await?;

    assert_eq!(outcome, ProcessOutcome::Success);
    assert_eq!(log.lock().unwrap().describes.len(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn describe_failures_are_tolerated() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(missing(HANDLE)))
        .then(Ok(running(HANDLE)))
        .then(Ok(stopped(HANDLE, Some(0))));

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let mut events: Vec<MonitorEvent> = Vec::new();
    let outcome = controller.run(&mut events).await?;

    assert_eq!(outcome, ProcessOutcome::Success);
    match &events[1] {
        MonitorEvent::DescribeFailures { failures, elapsed } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].reason.as_deref(), Some("MISSING"));
            assert_eq!(*elapsed, Duration::ZERO);
        }
        other => panic!("expected DescribeFailures, got {other:?}"),
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_describe_answer_is_waited_out() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(DescribeTasksOutput::default()))
        .then(Ok(stopped(HANDLE, Some(0))));
    let log = backend.log();

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let mut events: Vec<MonitorEvent> = Vec::new();
    let outcome = controller.run(&mut events).await?;

    assert_eq!(outcome, ProcessOutcome::Success);
    assert_eq!(log.lock().unwrap().describes.len(), 2);
    assert!(matches!(
        events[1],
        MonitorEvent::DescribeFailures { ref failures, .. } if failures.is_empty()
    ));
    assert!(matches!(events[2], MonitorEvent::Stopped { .. }));

    Ok(())
}

/// A STOPPED task that comes back alongside failures is not trusted yet.
#[tokio::test(start_paused = true)]
async fn tasks_with_failures_are_treated_as_failures() -> TestResult {
    let mut mixed = stopped(HANDLE, Some(3));
    mixed.failures = missing(HANDLE).failures;

    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(mixed))
        .then(Ok(stopped(HANDLE, Some(0))));
    let log = backend.log();

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let mut events: Vec<MonitorEvent> = Vec::new();
    let outcome = controller.run(&mut events).await?;

    assert_eq!(outcome, ProcessOutcome::Success);
    assert_eq!(log.lock().unwrap().describes.len(), 2);
    match &events[1] {
        MonitorEvent::DescribeFailures { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].reason.as_deref(), Some("MISSING"));
        }
        other => panic!("expected DescribeFailures, got {other:?}"),
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn custom_interval_changes_describe_cadence() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE).then(Ok(running(HANDLE)));
    let log = backend.log();

    let config = TaskConfigBuilder::new().timeout_secs(10).build();
    let mut controller = Controller::new(backend, config).with_poll_options(PollOptions {
        interval: Duration::from_secs(2),
    });
    let outcome = controller.run(&mut Vec::<MonitorEvent>::new()).await?;

    assert_eq!(
        outcome,
        ProcessOutcome::TimedOut {
            elapsed: Duration::from_secs(10)
        }
    );
    let log = log.lock().unwrap();
    assert_eq!(log.describes.len(), 5);
    assert_eq!(log.describes[1].2 - log.describes[0].2, Duration::from_secs(2));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn describe_api_error_aborts_without_retry() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE)
        .then(Ok(running(HANDLE)))
        .then(Err(BackendError::from_code(
            Operation::DescribeTasks,
            Some("ClusterNotFoundException"),
            "Cluster not found.",
        )));
    let log = backend.log();

    let config = TaskConfigBuilder::new().timeout_secs(60).build();
    let mut controller = Controller::new(backend, config);
    let result = controller.run(&mut Vec::<MonitorEvent>::new()).await;

    match result {
        Err(EcsRunError::Poll { kind, message }) => {
            assert_eq!(kind, BackendErrorKind::ClusterNotFound);
            assert_eq!(message, "Cluster not found.");
        }
        other => panic!("expected Poll error, got {other:?}"),
    }
    assert_eq!(log.lock().unwrap().describes.len(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn launch_rejection_never_polls() -> TestResult {
    let backend = ScriptedBackend::rejecting_submit(BackendError::from_code(
        Operation::SubmitTask,
        Some("AccessDeniedException"),
        "not authorized to perform ecs:RunTask",
    ));
    let log = backend.log();

    let mut controller = Controller::new(backend, TaskConfigBuilder::new().build());
    let mut events: Vec<MonitorEvent> = Vec::new();
    let result = controller.run(&mut events).await;

    match result {
        Err(err @ EcsRunError::Launch { .. }) => {
            assert_eq!(
                err.to_string(),
                "AccessDeniedException not authorized to perform ecs:RunTask"
            );
        }
        other => panic!("expected Launch error, got {other:?}"),
    }
    assert!(events.is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.submissions.len(), 1);
    assert!(log.describes.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn command_is_submitted_with_empty_tokens() -> TestResult {
    let backend = ScriptedBackend::new(HANDLE).then(Ok(stopped(HANDLE, Some(0))));
    let log = backend.log();

    let config = TaskConfigBuilder::new().command("echo  hi").build();
    let mut controller = Controller::new(backend, config);
    controller.run(&mut Vec::<MonitorEvent>::new()).await?;

    assert_eq!(
        log.lock().unwrap().submissions[0].command,
        vec!["echo", "", "hi"]
    );

    Ok(())
}
