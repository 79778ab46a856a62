//! Shared application model
//!
//! Holds the current playlist tree and workflow state. Only the controller
//! writes, and always by replacing a whole value; the renderer reads cloned
//! snapshots.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::error::{CurationError, Result};

use super::tree::PlaylistTree;
use super::types::{Phase, Status};
use super::workflow::WorkflowState;

#[derive(Clone, Default)]
pub struct AppModel {
    library: Arc<RwLock<Arc<PlaylistTree>>>,
    workflow: Arc<Mutex<WorkflowState>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Library
    // ========================================================================

    pub async fn get_library(&self) -> Arc<PlaylistTree> {
        self.library.read().await.clone()
    }

    /// Swap in a new tree and reset the workflow under both locks
    pub async fn replace_library(&self, tree: PlaylistTree, status: Status) {
        let mut library = self.library.write().await;
        let mut workflow = self.workflow.lock().await;
        *library = Arc::new(tree);
        *workflow = workflow.reset(status);
    }

    // ========================================================================
    // Workflow
    // ========================================================================

    pub async fn get_workflow_state(&self) -> WorkflowState {
        self.workflow.lock().await.clone()
    }

    pub async fn get_phase(&self) -> Phase {
        self.workflow.lock().await.phase
    }

    pub async fn get_status(&self) -> Status {
        self.workflow.lock().await.status.clone()
    }

    /// Replace the state with `transition(current)` when it yields one.
    /// Returns whether anything was committed. A successor that breaks the
    /// workflow invariants is refused and the current state kept.
    pub(crate) async fn commit_with<F>(&self, transition: F) -> bool
    where
        F: FnOnce(&WorkflowState) -> Option<WorkflowState>,
    {
        let mut workflow = self.workflow.lock().await;
        match transition(&workflow) {
            Some(next) => install(&mut workflow, next),
            None => false,
        }
    }

    /// Commit the state produced by a fallible transition and return its
    /// by-product. On error nothing changes.
    pub(crate) async fn try_commit<F, T>(&self, transition: F) -> Result<T>
    where
        F: FnOnce(&WorkflowState) -> Result<(WorkflowState, T)>,
    {
        let mut workflow = self.workflow.lock().await;
        let (next, output) = transition(&workflow)?;
        if install(&mut workflow, next) {
            Ok(output)
        } else {
            Err(CurationError::precondition("Invalid workflow transition"))
        }
    }

    pub(crate) async fn set_status(&self, status: Status) {
        let mut workflow = self.workflow.lock().await;
        *workflow = workflow.with_status(status);
    }
}

fn install(workflow: &mut WorkflowState, next: WorkflowState) -> bool {
    if !next.is_consistent() {
        tracing::error!(phase = %next.phase, "Refusing inconsistent workflow state");
        return false;
    }
    *workflow = next;
    true
}
