//! Workspace selection

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{WorkspaceResolver, DEFAULT_WORKSPACE};
use crate::error::WorkspaceError;

/// Environment variable that selects a workspace, overriding the data dir.
pub const WORKSPACE_ENV: &str = "STATEOUT_WORKSPACE";

/// Per-project data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".stateout";

/// File in the data directory recording the selected workspace.
pub const ENVIRONMENT_FILE: &str = "environment";

/// Resolves the workspace from the environment, then the data directory.
#[derive(Debug, Clone)]
pub struct EnvWorkspaceResolver {
    root: PathBuf,
}

impl EnvWorkspaceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn environment_file(&self) -> PathBuf {
        self.root.join(DEFAULT_DATA_DIR).join(ENVIRONMENT_FILE)
    }

    fn from_file(path: &Path) -> Result<Option<String>, WorkspaceError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(contents
                .lines()
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(WorkspaceError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }
}

impl WorkspaceResolver for EnvWorkspaceResolver {
    fn current_workspace(&self) -> Result<String, WorkspaceError> {
        let name = match std::env::var(WORKSPACE_ENV) {
            Ok(name) => {
                tracing::debug!("Workspace {name:?} selected by {WORKSPACE_ENV}");
                name
            }
            Err(_) => Self::from_file(&self.environment_file())?
                .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string()),
        };

        validate_workspace_name(&name)?;
        Ok(name)
    }
}

/// Reject names that cannot be used as a workspace directory.
///
/// # Errors
///
/// Returns [`WorkspaceError::InvalidName`] for empty names, the `.` and `..`
/// directory entries, and names containing path separators or whitespace.
pub fn validate_workspace_name(name: &str) -> Result<(), WorkspaceError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name == "." || name == ".." {
        Some("name must not be \".\" or \"..\"")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.chars().any(char::is_whitespace) {
        Some("name must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(WorkspaceError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
