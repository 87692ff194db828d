// src/lib.rs

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod monitor;
pub mod report;

use std::path::Path;

use tracing::{debug, info};

use crate::backend::{EcsBackend, SubmitTaskRequest};
use crate::cli::CliArgs;
use crate::config::{RawTaskConfig, load_layered};
use crate::errors::Result;
use crate::monitor::{Controller, TracingSink};
use crate::report::RunReport;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config layering (env, file, CLI) and validation
/// - the ECS backend
/// - the launch / poll / classify controller
pub async fn run(args: CliArgs) -> Result<RunReport> {
    let config = load_layered(
        RawTaskConfig::from_env(),
        args.config.as_deref().map(Path::new),
        args.to_raw_config(),
    )?;
    info!(timeout_secs = config.timeout().as_secs(), "set timeout");

    if args.dry_run {
        let request = SubmitTaskRequest::from_config(&config);
        debug!("dry-run complete (nothing submitted)");
        return Ok(RunReport::DryRun { config, request });
    }

    let backend = EcsBackend::from_env(config.region()).await;
    let mut controller = Controller::new(backend, config);
    let outcome = controller.run(&mut TracingSink).await?;

    Ok(RunReport::Completed(outcome))
}
