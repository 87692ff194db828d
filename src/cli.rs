// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The launch options are deliberately optional at the clap level: they may
//! come from `--config`, and a missing value must exit with 1 (a
//! configuration error), not clap's usage code.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::config::RawTaskConfig;

/// Command-line arguments for `ecsrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ecsrun",
    version,
    about = "Run one ECS task with an overridden command and wait for its exit code.",
    long_about = None
)]
pub struct CliArgs {
    /// Name of the ECS cluster.
    #[arg(long, value_name = "NAME")]
    pub cluster: Option<String>,

    /// Task definition to launch (family or family:revision).
    #[arg(short = 't', long = "taskdef", value_name = "NAME")]
    pub task_definition: Option<String>,

    /// Container whose command is overridden.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub container_name: Option<String>,

    /// Command that overrides the container's default one.
    ///
    /// Split on single spaces; no quoting.
    #[arg(short = 'c', long, value_name = "CMD", allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Timeout in seconds. Default: 600.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// AWS region. Overrides `AWS_DEFAULT_REGION`.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Optional TOML file supplying any of the options above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ECSRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print the submission request, but don't launch anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The CLI layer of the configuration.
    pub fn to_raw_config(&self) -> RawTaskConfig {
        RawTaskConfig {
            cluster: self.cluster.clone(),
            task_definition: self.task_definition.clone(),
            container_name: self.container_name.clone(),
            command: self.command.clone(),
            timeout: self.timeout,
            region: self.region.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments without letting clap exit on its own.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}

/// Exit code for a clap parse failure.
///
/// `--help` and `--version` are not failures. Everything else is an option
/// error and shares the exit code of a failed validation.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}
