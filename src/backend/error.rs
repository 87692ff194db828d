// src/backend/error.rs

//! Classification of backend error codes.
//!
//! Backends report failures as string codes (`ClusterNotFoundException`,
//! `AccessDeniedException`, ...). These are mapped once, here, onto a closed
//! enum with an `Other` fallback so callers can match exhaustively.

use std::fmt;

/// Which backend call produced an error.
///
/// `DescribeTasks` only recognises a subset of the codes; placement and
/// authorisation specific codes fall through to `Other` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitTask,
    DescribeTasks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendErrorKind {
    Server,
    Client,
    InvalidParameter,
    ClusterNotFound,
    UnsupportedFeature,
    PlatformUnknown,
    PlatformTaskDefinitionIncompatibility,
    AccessDenied,
    Blocked,
    /// Unrecognised code, or no code at all (transport failure).
    Other(Option<String>),
}

impl BackendErrorKind {
    /// Map a raw error code for the given operation.
    pub fn for_operation(operation: Operation, code: Option<&str>) -> Self {
        let Some(code) = code else {
            return BackendErrorKind::Other(None);
        };

        let kind = Self::from_code(code);
        match operation {
            Operation::SubmitTask => kind,
            Operation::DescribeTasks if kind.is_submit_only() => {
                BackendErrorKind::Other(Some(code.to_string()))
            }
            Operation::DescribeTasks => kind,
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "ServerException" => BackendErrorKind::Server,
            "ClientException" => BackendErrorKind::Client,
            "InvalidParameterException" => BackendErrorKind::InvalidParameter,
            "ClusterNotFoundException" => BackendErrorKind::ClusterNotFound,
            "UnsupportedFeatureException" => BackendErrorKind::UnsupportedFeature,
            "PlatformUnknownException" => BackendErrorKind::PlatformUnknown,
            "PlatformTaskDefinitionIncompatibilityException" => {
                BackendErrorKind::PlatformTaskDefinitionIncompatibility
            }
            "AccessDeniedException" => BackendErrorKind::AccessDenied,
            "BlockedException" => BackendErrorKind::Blocked,
            other => BackendErrorKind::Other(Some(other.to_string())),
        }
    }

    fn is_submit_only(&self) -> bool {
        matches!(
            self,
            BackendErrorKind::UnsupportedFeature
                | BackendErrorKind::PlatformUnknown
                | BackendErrorKind::PlatformTaskDefinitionIncompatibility
                | BackendErrorKind::AccessDenied
                | BackendErrorKind::Blocked
        )
    }

    /// The backend's own name for this category.
    pub fn code(&self) -> &str {
        match self {
            BackendErrorKind::Server => "ServerException",
            BackendErrorKind::Client => "ClientException",
            BackendErrorKind::InvalidParameter => "InvalidParameterException",
            BackendErrorKind::ClusterNotFound => "ClusterNotFoundException",
            BackendErrorKind::UnsupportedFeature => "UnsupportedFeatureException",
            BackendErrorKind::PlatformUnknown => "PlatformUnknownException",
            BackendErrorKind::PlatformTaskDefinitionIncompatibility => {
                "PlatformTaskDefinitionIncompatibilityException"
            }
            BackendErrorKind::AccessDenied => "AccessDeniedException",
            BackendErrorKind::Blocked => "BlockedException",
            BackendErrorKind::Other(Some(code)) => code,
            BackendErrorKind::Other(None) => "UnclassifiedError",
        }
    }
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned by a [`TaskBackend`](super::TaskBackend) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build an error from a raw code as reported by the backend.
    pub fn from_code(operation: Operation, code: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::for_operation(operation, code), message)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.message)
    }
}

impl std::error::Error for BackendError {}
