//! Pipeline Board Engine
//!
//! Owns the board projection for one pipeline and keeps it consistent with
//! the remote system under partial failure: loads replace the projection
//! wholesale, stage moves apply optimistically and roll back exactly on
//! remote failure, field edits only land after the remote call succeeds.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::api::{LeadRepository, StageCatalog};
use crate::board::BoardState;
use crate::error::{LoadError, TransitionError};
use crate::models::{LeadFilters, LeadPatch};
use crate::log::console_log as log;
use crate::notify::{Notice, NoticeSink};

/// One pipeline's board: projection plus the remote calls that drive it.
///
/// The projection is owned exclusively by this instance; nothing else writes
/// to it. Clone the handle via `Rc` to share it with event handlers.
pub struct PipelineBoard {
    leads: Rc<dyn LeadRepository>,
    stages: Rc<dyn StageCatalog>,
    state: RefCell<BoardState>,
    /// Leads with a move pending; overlapping moves of one lead are rejected.
    in_flight: RefCell<HashSet<u32>>,
    notices: NoticeSink,
}

impl PipelineBoard {
    pub fn new(
        leads: Rc<dyn LeadRepository>,
        stages: Rc<dyn StageCatalog>,
        notices: NoticeSink,
    ) -> Self {
        Self {
            leads,
            stages,
            state: RefCell::new(BoardState::default()),
            in_flight: RefCell::new(HashSet::new()),
            notices,
        }
    }

    /// Cloned snapshot of the current projection, for rendering.
    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    /// Fetch stages then leads (leads need stage identities for the counts)
    /// and replace the whole projection.
    pub async fn load(
        &self,
        pipeline_id: Option<u32>,
        filters: &LeadFilters,
    ) -> Result<(), LoadError> {
        let pipeline_id = pipeline_id.ok_or(LoadError::MissingPipeline)?;

        let stages = self
            .stages
            .list_stages(pipeline_id)
            .await
            .map_err(LoadError::Stages)?;
        let leads = self
            .leads
            .list_leads(pipeline_id, filters)
            .await
            .map_err(LoadError::Leads)?;

        log(&format!(
            "[BOARD] Loaded pipeline {}: {} stages, {} leads",
            pipeline_id,
            stages.len(),
            leads.len()
        ));
        self.state.borrow_mut().replace(stages, leads);
        Ok(())
    }

    /// Move a lead to another stage: optimistic local apply, remote commit,
    /// exact rollback plus a user-visible notice on failure.
    pub async fn move_lead(&self, lead_id: u32, target_stage_id: u32) -> Result<(), TransitionError> {
        // Capture the snapshot before anything mutates; it is this call's
        // private copy for both commit and rollback.
        let snapshot = self
            .state
            .borrow()
            .take_move_snapshot(lead_id, target_stage_id)
            .ok_or(TransitionError::UnknownLead(lead_id))?;

        // Dropping a card on its own column is a no-op, no remote call
        if snapshot.from_stage == snapshot.to_stage {
            return Ok(());
        }

        if !self.in_flight.borrow_mut().insert(lead_id) {
            (self.notices)(Notice::info("This lead is still being moved, hold on."));
            return Err(TransitionError::MoveInFlight(lead_id));
        }

        // Optimistic apply is visible before the remote call goes out
        self.state.borrow_mut().apply_move(&snapshot);
        log(&format!(
            "[BOARD] Moving lead {} from stage {} to {}",
            lead_id, snapshot.from_stage, snapshot.to_stage
        ));

        let result = self.leads.update_lead_stage(lead_id, target_stage_id).await;
        self.in_flight.borrow_mut().remove(&lead_id);

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.borrow_mut().revert_move(&snapshot);
                log(&format!("[BOARD] Move of lead {} failed, rolled back: {}", lead_id, e));
                (self.notices)(Notice::error("Could not move the lead. Please try again."));
                Err(TransitionError::Remote(e))
            }
        }
    }

    /// Save edited fields. Never optimistic: local state changes only after
    /// the remote call succeeds.
    pub async fn update_lead(&self, lead_id: u32, patch: &LeadPatch) -> Result<(), TransitionError> {
        if patch.is_empty() {
            return Ok(());
        }

        match self.leads.update_lead(lead_id, patch).await {
            Ok(()) => {
                self.state.borrow_mut().merge_patch(lead_id, patch);
                Ok(())
            }
            Err(e) => {
                log(&format!("[BOARD] Update of lead {} failed: {}", lead_id, e));
                (self.notices)(Notice::error("Could not save the lead. Please try again."));
                Err(TransitionError::Remote(e))
            }
        }
    }
}
