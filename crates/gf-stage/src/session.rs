//! Session view — read-only queries conditions make against a device session

use crate::outcome::{GameOutcome, ProgressiveAward};
use crate::stage::StagePosition;
use crate::taxonomy::CycleState;

/// Read-only view of a device session
///
/// Implemented by the harness that owns the device. None of these calls may
/// mutate session state.
pub trait SessionView {
    /// Games completed this session
    fn game_count(&self) -> u64;

    /// Total prize awarded this session, in credits
    fn total_awarded(&self) -> u64;

    /// Current cycle-state flags
    fn cycle_state(&self) -> CycleState;

    /// Current stage and label
    fn current_stage(&self) -> StagePosition;

    /// Every progressive awarded this session, oldest first
    fn progressive_history(&self) -> &[ProgressiveAward];

    /// Most recently completed game, if any
    fn last_outcome(&self) -> Option<&GameOutcome>;
}

/// Owned snapshot of a session, handy for tests and for recording evidence
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub game_count: u64,
    pub total_awarded: u64,
    pub cycle_state: CycleState,
    pub stage: StagePosition,
    #[serde(default)]
    pub progressives: Vec<ProgressiveAward>,
    #[serde(default)]
    pub last_outcome: Option<GameOutcome>,
}

impl SessionSnapshot {
    /// Capture any session view
    pub fn capture(view: &dyn SessionView) -> Self {
        Self {
            game_count: view.game_count(),
            total_awarded: view.total_awarded(),
            cycle_state: view.cycle_state(),
            stage: view.current_stage(),
            progressives: view.progressive_history().to_vec(),
            last_outcome: view.last_outcome().cloned(),
        }
    }

    /// Fold a completed game into the snapshot
    pub fn record(&mut self, outcome: GameOutcome) {
        self.game_count = outcome.game_number.max(self.game_count + 1);
        self.total_awarded += outcome.awarded + outcome.progressive_total();
        self.cycle_state = outcome.cycle_state;
        self.stage = outcome.stage_after.clone();
        self.progressives.extend(outcome.progressives.iter().cloned());
        self.last_outcome = Some(outcome);
    }
}

impl SessionView for SessionSnapshot {
    fn game_count(&self) -> u64 {
        self.game_count
    }

    fn total_awarded(&self) -> u64 {
        self.total_awarded
    }

    fn cycle_state(&self) -> CycleState {
        self.cycle_state
    }

    fn current_stage(&self) -> StagePosition {
        self.stage.clone()
    }

    fn progressive_history(&self) -> &[ProgressiveAward] {
        &self.progressives
    }

    fn last_outcome(&self) -> Option<&GameOutcome> {
        self.last_outcome.as_ref()
    }
}
