// src/config/mod.rs

//! Configuration for a single launch.
//!
//! Values come from three layers, lowest priority first:
//! 1. the environment (`AWS_DEFAULT_REGION`)
//! 2. an optional TOML file (`--config`)
//! 3. CLI flags
//!
//! The merged [`RawTaskConfig`] is validated exactly once into an immutable
//! [`TaskConfig`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_layered};
pub use model::{DEFAULT_TIMEOUT_SECS, RawTaskConfig, TaskConfig};
