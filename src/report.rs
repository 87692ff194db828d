// src/report.rs

//! Operator-facing rendering of the final result.
//!
//! Everything here returns strings; `main` decides where they go.

use crate::backend::SubmitTaskRequest;
use crate::config::TaskConfig;
use crate::errors::EcsRunError;
use crate::monitor::{Diagnostics, ProcessOutcome};

/// What a call to [`crate::run`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// `--dry-run`: the request that would have been submitted.
    DryRun {
        config: TaskConfig,
        request: SubmitTaskRequest,
    },
    Completed(ProcessOutcome),
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunReport::DryRun { .. } => 0,
            RunReport::Completed(outcome) => outcome.exit_code(),
        }
    }
}

pub fn render_report(report: &RunReport) -> String {
    match report {
        RunReport::DryRun { config, request } => render_dry_run(config, request),
        RunReport::Completed(outcome) => render_outcome(outcome),
    }
}

pub fn render_outcome(outcome: &ProcessOutcome) -> String {
    match outcome {
        ProcessOutcome::Success => "Task successfully finished.".to_string(),
        ProcessOutcome::Failed { exit_code, detail } => {
            format!(
                "Task failed with exit code {exit_code}.\n{}",
                render_diagnostics(detail)
            )
        }
        ProcessOutcome::Indeterminate { detail } => {
            format!(
                "Task stopped without an exit code.\n{}",
                render_diagnostics(detail)
            )
        }
        ProcessOutcome::TimedOut { elapsed } => format!(
            "Timeout after {}s. Please check logs or extend timeout value. \
             The remote task was not stopped.",
            elapsed.as_secs()
        ),
    }
}

pub fn render_error(err: &EcsRunError) -> String {
    format!("ecsrun {} error: {err}", err.stage())
}

fn render_diagnostics(detail: &Diagnostics) -> String {
    let mut lines = Vec::new();
    match detail.container {
        Some(ref container) => lines.push(format!("  {container}")),
        None => lines.push("  no container reported".to_string()),
    }
    if let Some(ref reason) = detail.stopped_reason {
        lines.push(format!("  stopped_reason={reason:?}"));
    }
    lines.join("\n")
}

fn render_dry_run(config: &TaskConfig, request: &SubmitTaskRequest) -> String {
    let mut out = Vec::new();
    out.push("ecsrun dry-run".to_string());
    out.push(format!("  cluster: {}", request.cluster));
    out.push(format!("  taskdef: {}", request.task_definition));
    out.push(format!("  container: {}", request.container_name));
    out.push(format!("  command: {:?}", request.command));
    out.push(format!("  timeout: {}s", config.timeout().as_secs()));
    if let Some(region) = config.region() {
        out.push(format!("  region: {region}"));
    }
    out.join("\n")
}
