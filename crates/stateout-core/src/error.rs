//! Error types for stateout-core
//!
//! Collaborator failures are typed so the retriever can tell which stage
//! failed; everything converges on [`Error`] for callers that only need a
//! message.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::SourceRange;

/// Failure reported by a state backend or one of its state managers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The state path override points at a directory
    #[error("state path {} is a directory, not a file", .0.display())]
    StatePathIsDirectory(PathBuf),

    /// The selected workspace has no state directory
    #[error("workspace \"{0}\" does not exist")]
    WorkspaceNotFound(String),

    /// The state file exists but could not be read
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// The state file is not valid JSON or has the wrong shape
    #[error("failed to parse {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        message: String,
        subject: Option<SourceRange>,
    },

    /// The state file uses a format version this reader does not know
    #[error("{} uses state format version {version}, which is not supported", .path.display())]
    UnsupportedVersion { path: PathBuf, version: u64 },

    /// Any other backend-specific failure
    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Source position the failure points at, if any.
    #[must_use]
    pub const fn subject(&self) -> Option<&SourceRange> {
        match self {
            Self::Parse { subject, .. } => subject.as_ref(),
            _ => None,
        }
    }
}

/// Failure while working out which workspace is selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("invalid workspace name \"{name}\": {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

/// Failure while loading layered configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level error type for stateout-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for stateout-core operations
pub type Result<T> = std::result::Result<T, Error>;
