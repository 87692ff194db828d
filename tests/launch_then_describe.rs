// tests/launch_then_describe.rs

mod common;
use crate::common::builders::TaskConfigBuilder;
use crate::common::scripted_backend::{ScriptedBackend, stopped, with_status};

use std::time::Duration;

use ecsrun::backend::TaskBackend;
use ecsrun::monitor::{StatusSnapshot, launch};

#[tokio::test]
async fn fresh_launch_describes_as_non_terminal() {
    for status in ["PROVISIONING", "PENDING", "RUNNING"] {
        let mut backend = ScriptedBackend::new("task-123").then(Ok(with_status("task-123", status, None)));
        let config = TaskConfigBuilder::new().build();

        let handle = launch(&mut backend, &config).await.unwrap();
        let output = backend.describe_tasks(config.cluster(), &handle).await.unwrap();
        let snapshot = StatusSnapshot::from_description(&output.tasks[0], "app", Duration::ZERO);

        assert_eq!(handle.as_str(), "task-123");
        assert_eq!(snapshot.last_status, status);
        assert!(!snapshot.is_terminal());
    }
}

#[tokio::test]
async fn backend_reported_stop_is_terminal_on_first_describe() {
    let mut backend = ScriptedBackend::new("task-9").then(Ok(stopped("task-9", Some(0))));
    let config = TaskConfigBuilder::new().build();

    let handle = launch(&mut backend, &config).await.unwrap();
    let output = backend.describe_tasks(config.cluster(), &handle).await.unwrap();
    let snapshot = StatusSnapshot::from_description(&output.tasks[0], "app", Duration::ZERO);

    assert!(snapshot.is_terminal());
}

#[tokio::test]
async fn each_launch_submits_a_new_task() {
    let mut backend = ScriptedBackend::new("task-123");
    let log = backend.log();
    let config = TaskConfigBuilder::new().build();

    launch(&mut backend, &config).await.unwrap();
    launch(&mut backend, &config).await.unwrap();

    assert_eq!(log.lock().unwrap().submissions.len(), 2);
}
