//! State snapshots and the collaborators that produce them
//!
//! The traits here are the seams between the output command and whatever
//! stores state. [`local`] provides the file-backed implementation used by the
//! binary; tests substitute their own.

pub mod local;
pub mod workspace;

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    diagnostics::{Diagnostic, Diagnostics, SourcePos, SourceRange},
    error::{BackendError, WorkspaceError},
    values::{OutputSet, OutputValue},
};

pub use local::{LocalBackend, LocalBackendLoader, LocalStateMgr};
pub use workspace::{validate_workspace_name, EnvWorkspaceResolver};

/// Name of the workspace used when none is selected.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Builds a backend, optionally pointed at an explicit state file.
pub trait BackendLoader {
    fn load(&self, state_path: Option<&Path>) -> Result<Box<dyn Backend>, BackendError>;
}

/// A configured state store holding one state per workspace.
pub trait Backend {
    fn state_mgr(&self, workspace: &str) -> Result<Box<dyn StateMgr>, BackendError>;
}

/// Reads and caches the state of a single workspace.
pub trait StateMgr {
    /// Re-read the persisted state. Blocks until the read completes.
    fn refresh_state(&mut self) -> Result<(), BackendError>;

    /// The last refreshed snapshot; `None` when no state has been written yet.
    fn state(&self) -> Option<&State>;
}

/// Determines which workspace the command operates on.
pub trait WorkspaceResolver {
    fn current_workspace(&self) -> Result<String, WorkspaceError>;
}

/// Read-only snapshot of the root module's outputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    outputs: OutputSet,
    diagnostics: Diagnostics,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u64>,
}

#[derive(Deserialize)]
struct StateV4 {
    #[serde(default)]
    outputs: Map<String, Value>,
}

#[derive(Deserialize)]
struct OutputV4 {
    value: Value,
    #[serde(rename = "type")]
    ty: Option<Value>,
    #[serde(default)]
    sensitive: bool,
}

#[derive(Deserialize)]
struct StateV3 {
    #[serde(default)]
    modules: Vec<ModuleV3>,
}

#[derive(Deserialize)]
struct ModuleV3 {
    path: Vec<String>,
    #[serde(default)]
    outputs: Map<String, Value>,
}

#[derive(Deserialize)]
struct OutputV3 {
    value: Value,
    #[serde(default)]
    sensitive: bool,
}

impl State {
    #[must_use]
    pub const fn new(outputs: OutputSet) -> Self {
        Self {
            outputs,
            diagnostics: Diagnostics::new(),
        }
    }

    pub const fn outputs(&self) -> &OutputSet {
        &self.outputs
    }

    /// Warnings noticed while reading the snapshot.
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Parse a state file. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] for malformed JSON or an unexpected
    /// shape, and [`BackendError::UnsupportedVersion`] for format versions
    /// other than 3 and 4.
    pub fn from_json(path: &Path, bytes: &[u8]) -> Result<Self, BackendError> {
        let raw: Value = serde_json::from_slice(bytes).map_err(|err| BackendError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
            subject: Some(error_subject(path, bytes, &err)),
        })?;

        let probe: VersionProbe = from_value(path, raw.clone())?;
        match probe.version {
            Some(4) => Self::from_v4(path, raw),
            Some(3) => Self::from_v3(path, raw),
            Some(version) => Err(BackendError::UnsupportedVersion {
                path: path.to_path_buf(),
                version,
            }),
            None => Err(BackendError::Parse {
                path: path.to_path_buf(),
                message: "missing \"version\" field".to_string(),
                subject: None,
            }),
        }
    }

    fn from_v4(path: &Path, raw: Value) -> Result<Self, BackendError> {
        let state: StateV4 = from_value(path, raw)?;
        let mut outputs = OutputSet::new();
        for (name, output) in state.outputs {
            let output: OutputV4 = from_value(path, output)?;
            let value = OutputValue::new(name, output.value).with_sensitive(output.sensitive);
            outputs.insert(match output.ty {
                Some(ty) => value.with_type(ty),
                None => value,
            });
        }
        tracing::debug!("Read {} outputs from {}", outputs.len(), path.display());
        Ok(Self::new(outputs))
    }

    fn from_v3(path: &Path, raw: Value) -> Result<Self, BackendError> {
        let state: StateV3 = from_value(path, raw)?;
        let mut outputs = OutputSet::new();
        if let Some(root) = state
            .modules
            .into_iter()
            .find(|module| module.path.len() == 1 && module.path[0] == "root")
        {
            for (name, output) in root.outputs {
                let output: OutputV3 = from_value(path, output)?;
                outputs.insert(OutputValue::new(name, output.value).with_sensitive(output.sensitive));
            }
        }
        tracing::debug!(
            "Read {} outputs from legacy state {}",
            outputs.len(),
            path.display()
        );

        Ok(Self {
            outputs,
            diagnostics: Diagnostics::from(Diagnostic::warning("Legacy state format").with_detail(
                format!(
                    "{} uses state format version 3. Output types are inferred from \
                     their values; write the state again with a current version to \
                     record them.",
                    path.display()
                ),
            )),
        })
    }
}

fn from_value<T: for<'de> Deserialize<'de>>(path: &Path, value: Value) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|err| BackendError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
        subject: None,
    })
}

/// Point a diagnostic at the character a JSON syntax error was reported on.
fn error_subject(path: &Path, bytes: &[u8], err: &serde_json::Error) -> SourceRange {
    let line = err.line().max(1);
    let column = err.column().max(1);
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line - 1)
        .map(|l| l.len() + 1)
        .sum();
    let byte = (line_start + column - 1).min(bytes.len());
    SourceRange::new(
        path.display().to_string(),
        SourcePos::new(line, column, byte),
        SourcePos::new(line, column + 1, (byte + 1).min(bytes.len())),
    )
}
