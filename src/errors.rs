// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::backend::BackendErrorKind;

#[derive(Error, Debug)]
pub enum EcsRunError {
    #[error("[OPTION VALIDATION ERROR] {0}")]
    Config(String),

    /// The backend rejected the task submission.
    #[error("{kind} {message}")]
    Launch {
        kind: BackendErrorKind,
        message: String,
    },

    /// The backend rejected a status query while polling.
    #[error("{kind} {message}")]
    Poll {
        kind: BackendErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EcsRunError {
    /// Short label for the stage that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            EcsRunError::Config(_) | EcsRunError::Io(_) | EcsRunError::Toml(_) => "config",
            EcsRunError::Launch { .. } => "launch",
            EcsRunError::Poll { .. } => "poll",
        }
    }
}

pub type Result<T> = std::result::Result<T, EcsRunError>;
