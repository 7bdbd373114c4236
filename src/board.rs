//! Board Projection
//!
//! In-memory projection of one pipeline: stages (columns) plus the leads
//! referencing them. Owned by a single board instance and mutated only
//! through `replace`, the move snapshot pair, and `merge_patch`.

use crate::models::{Lead, LeadPatch, Stage};

/// Snapshot of one stage move, captured at call time.
///
/// The optimistic-then-rollback pattern as an explicit three-phase object:
/// capture (`take_move_snapshot`), apply (`apply_move`), and on remote
/// failure an exact revert (`revert_move`). Each snapshot owns its values,
/// so concurrent moves of different leads never share state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSnapshot {
    pub lead_id: u32,
    pub from_stage: u32,
    pub to_stage: u32,
}

/// Stages and leads of one pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub stages: Vec<Stage>,
    pub leads: Vec<Lead>,
}

impl BoardState {
    /// Replace the whole projection with freshly fetched data.
    ///
    /// Stages are sorted ascending by position and every count is recomputed
    /// from the leads actually received.
    pub fn replace(&mut self, mut stages: Vec<Stage>, leads: Vec<Lead>) {
        stages.sort_by_key(|s| s.position);
        self.stages = stages;
        self.leads = leads;
        self.recompute_counts();
    }

    /// Recompute every stage count from scratch.
    pub fn recompute_counts(&mut self) {
        for stage in &mut self.stages {
            stage.count = 0;
        }
        for lead in &self.leads {
            if let Some(stage) = self.stages.iter_mut().find(|s| s.id == lead.stage_id) {
                stage.count += 1;
            }
        }
    }

    pub fn lead(&self, lead_id: u32) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == lead_id)
    }

    pub fn stage(&self, stage_id: u32) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Leads of one column, in load order.
    pub fn leads_in_stage(&self, stage_id: u32) -> Vec<Lead> {
        self.leads
            .iter()
            .filter(|l| l.stage_id == stage_id)
            .cloned()
            .collect()
    }

    /// Capture the move snapshot for a lead, or None for an unknown lead.
    pub fn take_move_snapshot(&self, lead_id: u32, target_stage_id: u32) -> Option<MoveSnapshot> {
        let lead = self.lead(lead_id)?;
        Some(MoveSnapshot {
            lead_id,
            from_stage: lead.stage_id,
            to_stage: target_stage_id,
        })
    }

    /// Optimistic apply: move the lead and shift the two counts.
    pub fn apply_move(&mut self, snapshot: &MoveSnapshot) {
        self.set_stage_and_counts(snapshot.lead_id, snapshot.from_stage, snapshot.to_stage);
    }

    /// Exact rollback of a previously applied move.
    pub fn revert_move(&mut self, snapshot: &MoveSnapshot) {
        self.set_stage_and_counts(snapshot.lead_id, snapshot.to_stage, snapshot.from_stage);
    }

    fn set_stage_and_counts(&mut self, lead_id: u32, from: u32, to: u32) {
        if let Some(lead) = self.leads.iter_mut().find(|l| l.id == lead_id) {
            lead.stage_id = to;
        }
        if let Some(source) = self.stages.iter_mut().find(|s| s.id == from) {
            source.count = source.count.saturating_sub(1);
        }
        if let Some(target) = self.stages.iter_mut().find(|s| s.id == to) {
            target.count += 1;
        }
    }

    /// Merge a confirmed patch into the local lead.
    pub fn merge_patch(&mut self, lead_id: u32, patch: &LeadPatch) {
        if let Some(lead) = self.leads.iter_mut().find(|l| l.id == lead_id) {
            patch.apply_to(lead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_stage(id: u32, position: i32, count: u32) -> Stage {
        Stage {
            id,
            name: format!("Stage {}", id),
            position,
            count,
        }
    }

    fn make_lead(id: u32, stage_id: u32) -> Lead {
        Lead {
            id,
            name: format!("Lead {}", id),
            company: None,
            email: None,
            phone: None,
            value: 0.0,
            note: None,
            source: None,
            created_at: None,
            updated_at: None,
            stage_id,
        }
    }

    fn sample_board() -> BoardState {
        let mut board = BoardState::default();
        board.replace(
            vec![make_stage(2, 1, 0), make_stage(1, 0, 0)],
            vec![make_lead(7, 1), make_lead(8, 1), make_lead(9, 2)],
        );
        board
    }

    #[test]
    fn test_replace_sorts_stages_and_recomputes_counts() {
        let board = sample_board();
        // Sorted by position despite insertion order
        assert_eq!(board.stages[0].id, 1);
        assert_eq!(board.stages[1].id, 2);
        // Counts derived from leads, not from the server payload
        assert_eq!(board.stage(1).unwrap().count, 2);
        assert_eq!(board.stage(2).unwrap().count, 1);
    }

    #[test]
    fn test_replace_ignores_server_counts() {
        let mut board = BoardState::default();
        board.replace(vec![make_stage(1, 0, 99)], vec![make_lead(7, 1)]);
        assert_eq!(board.stage(1).unwrap().count, 1);
    }

    #[test]
    fn test_apply_then_revert_restores_pre_state_exactly() {
        let mut board = sample_board();
        let before = board.clone();

        let snapshot = board.take_move_snapshot(7, 2).unwrap();
        board.apply_move(&snapshot);
        assert_eq!(board.lead(7).unwrap().stage_id, 2);
        assert_eq!(board.stage(1).unwrap().count, 1);
        assert_eq!(board.stage(2).unwrap().count, 2);

        board.revert_move(&snapshot);
        assert_eq!(board, before);
    }

    #[test]
    fn test_count_conservation_across_moves() {
        let mut board = sample_board();
        let total = board.leads.len() as u32;

        for (lead_id, target) in [(7u32, 2u32), (9, 1), (8, 2), (7, 1)] {
            let snapshot = board.take_move_snapshot(lead_id, target).unwrap();
            board.apply_move(&snapshot);
            let sum: u32 = board.stages.iter().map(|s| s.count).sum();
            assert_eq!(sum, total);
        }
    }

    #[test]
    fn test_source_count_floors_at_zero() {
        let mut board = BoardState::default();
        // A lead referencing a stage the catalog does not know about
        board.replace(vec![make_stage(1, 0, 0), make_stage(2, 1, 0)], vec![make_lead(7, 99)]);
        assert_eq!(board.stage(1).unwrap().count, 0);

        let snapshot = board.take_move_snapshot(7, 1).unwrap();
        board.apply_move(&snapshot);
        assert_eq!(board.stage(1).unwrap().count, 1);

        // Reverting decrements stage 1 back, and the unknown source stays absent
        board.revert_move(&snapshot);
        assert_eq!(board.stage(1).unwrap().count, 0);
        assert_eq!(board.lead(7).unwrap().stage_id, 99);
    }

    #[test]
    fn test_snapshot_for_unknown_lead_is_none() {
        let board = sample_board();
        assert!(board.take_move_snapshot(42, 2).is_none());
    }

    #[test]
    fn test_leads_in_stage() {
        let board = sample_board();
        let ids: Vec<u32> = board.leads_in_stage(1).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![7, 8]);
    }
}
