//! Fetch the root module's outputs, turning collaborator failures into
//! diagnostics.

use std::path::Path;

use strum::Display;

use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    state::{BackendLoader, WorkspaceResolver},
    values::OutputSet,
};

/// The step of retrieval that failed. Displays as the diagnostic summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RetrievalStage {
    #[strum(to_string = "Failed to initialize backend")]
    InitBackend,
    #[strum(to_string = "Error selecting workspace")]
    SelectWorkspace,
    #[strum(to_string = "Failed to acquire state manager")]
    AcquireStateMgr,
    #[strum(to_string = "Failed to refresh state")]
    RefreshState,
}

/// Outputs plus any warnings produced while reading them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retrieved {
    pub outputs: OutputSet,
    pub diagnostics: Diagnostics,
}

/// Runs backend load, workspace selection, state-manager acquisition and
/// refresh, in that order, stopping at the first failure.
pub struct OutputRetriever<'a> {
    loader: &'a dyn BackendLoader,
    workspaces: &'a dyn WorkspaceResolver,
}

fn stage_error(stage: RetrievalStage, err: &impl std::error::Error) -> Diagnostics {
    Diagnostics::from(Diagnostic::error(stage.to_string()).with_detail(err.to_string()))
}

impl<'a> OutputRetriever<'a> {
    pub fn new(loader: &'a dyn BackendLoader, workspaces: &'a dyn WorkspaceResolver) -> Self {
        Self { loader, workspaces }
    }

    /// Fetch all root module outputs.
    ///
    /// An absent state snapshot is an empty set, not a failure.
    ///
    /// # Errors
    ///
    /// Returns a single Error diagnostic naming the stage that failed.
    pub fn outputs(&self, state_path: Option<&Path>) -> Result<Retrieved, Diagnostics> {
        tracing::debug!("Loading backend");
        let backend = self
            .loader
            .load(state_path)
            .map_err(|err| stage_error(RetrievalStage::InitBackend, &err))?;

        let workspace = self
            .workspaces
            .current_workspace()
            .map_err(|err| stage_error(RetrievalStage::SelectWorkspace, &err))?;
        tracing::debug!("Using workspace {workspace}");

        let mut mgr = backend
            .state_mgr(&workspace)
            .map_err(|err| stage_error(RetrievalStage::AcquireStateMgr, &err))?;

        tracing::debug!("Refreshing state");
        mgr.refresh_state().map_err(|err| {
            let diag = Diagnostic::error(RetrievalStage::RefreshState.to_string())
                .with_detail(err.to_string());
            Diagnostics::from(match err.subject() {
                Some(subject) => diag.with_subject(subject.clone()),
                None => diag,
            })
        })?;

        Ok(match mgr.state() {
            Some(state) => Retrieved {
                outputs: state.outputs().clone(),
                diagnostics: state.diagnostics().clone(),
            },
            None => {
                tracing::debug!("No state snapshot; treating outputs as empty");
                Retrieved::default()
            }
        })
    }
}
