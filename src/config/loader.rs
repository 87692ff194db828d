// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawTaskConfig, TaskConfig};
use crate::errors::Result;

/// Load a configuration file and return the raw, unvalidated layer.
///
/// This only performs TOML deserialization. Use [`load_layered`] to merge
/// it with the other layers and validate.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawTaskConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawTaskConfig = toml::from_str(&contents)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Merge `base`, the optional config file, and `cli` (in increasing
/// priority) and validate the result.
pub fn load_layered(
    base: RawTaskConfig,
    file: Option<&Path>,
    cli: RawTaskConfig,
) -> Result<TaskConfig> {
    let mut merged = base;
    if let Some(path) = file {
        merged = merged.overlay(load_from_path(path)?);
    }
    merged = merged.overlay(cli);

    TaskConfig::try_from(merged)
}
