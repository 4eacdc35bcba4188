//! File-backed state storage
//!
//! Layout relative to the working directory:
//!
//! ```text
//! terraform.tfstate                              default workspace
//! terraform.tfstate.d/<name>/terraform.tfstate   other workspaces
//! ```

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{Backend, BackendLoader, State, StateMgr, DEFAULT_WORKSPACE};
use crate::error::BackendError;

/// State file of the default workspace.
pub const DEFAULT_STATE_FILENAME: &str = "terraform.tfstate";

/// Directory holding one subdirectory per non-default workspace.
pub const DEFAULT_WORKSPACE_DIR: &str = "terraform.tfstate.d";

/// Loads [`LocalBackend`]s rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalBackendLoader {
    root: PathBuf,
}

impl LocalBackendLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BackendLoader for LocalBackendLoader {
    fn load(&self, state_path: Option<&Path>) -> Result<Box<dyn Backend>, BackendError> {
        let state_path = state_path.map(|path| self.root.join(path));
        if let Some(path) = &state_path {
            if path.is_dir() {
                return Err(BackendError::StatePathIsDirectory(path.clone()));
            }
        }

        tracing::debug!(
            "Local backend at {} (state override: {:?})",
            self.root.display(),
            state_path
        );
        Ok(Box::new(LocalBackend {
            root: self.root.clone(),
            state_path,
        }))
    }
}

/// State files on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
    state_path: Option<PathBuf>,
}

impl LocalBackend {
    /// Where the state of `workspace` lives.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::WorkspaceNotFound`] for a non-default workspace
    /// without a state directory, unless the state path was overridden.
    pub fn state_path(&self, workspace: &str) -> Result<PathBuf, BackendError> {
        if let Some(path) = &self.state_path {
            return Ok(path.clone());
        }
        if workspace == DEFAULT_WORKSPACE {
            return Ok(self.root.join(DEFAULT_STATE_FILENAME));
        }

        let dir = self.root.join(DEFAULT_WORKSPACE_DIR).join(workspace);
        if dir.is_dir() {
            Ok(dir.join(DEFAULT_STATE_FILENAME))
        } else {
            Err(BackendError::WorkspaceNotFound(workspace.to_string()))
        }
    }
}

impl Backend for LocalBackend {
    fn state_mgr(&self, workspace: &str) -> Result<Box<dyn StateMgr>, BackendError> {
        Ok(Box::new(LocalStateMgr::new(self.state_path(workspace)?)))
    }
}

/// Reads one state file on demand.
#[derive(Debug, Clone)]
pub struct LocalStateMgr {
    path: PathBuf,
    state: Option<State>,
}

impl LocalStateMgr {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: None,
        }
    }
}

impl StateMgr for LocalStateMgr {
    fn refresh_state(&mut self) -> Result<(), BackendError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("No state at {}", self.path.display());
                self.state = None;
                return Ok(());
            }
            Err(err) => {
                return Err(BackendError::Io {
                    path: self.path.clone(),
                    message: err.to_string(),
                })
            }
        };

        self.state = Some(State::from_json(&self.path, &bytes)?);
        Ok(())
    }

    fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }
}
