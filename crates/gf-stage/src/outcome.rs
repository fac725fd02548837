//! Game outcome — what one completed game cycle produced

use serde::{Deserialize, Serialize};

use crate::stage::{GameStage, StagePosition};
use crate::taxonomy::{CycleState, ProgressiveTier};

/// Where one strip came to rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStop {
    /// Strip identifier
    pub strip: String,
    /// Stop position on the strip
    pub position: usize,
    /// Visible symbols (top to bottom)
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Progressive award info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveAward {
    pub tier: ProgressiveTier,
    /// Amount paid, in credits
    pub amount: u64,
}

/// Complete result of one game cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Session game number (1-based)
    pub game_number: u64,
    /// Stage the game was played in
    pub stage_before: StagePosition,
    /// Stage the device moved to after the game
    pub stage_after: StagePosition,
    /// Final strip stops
    #[serde(default)]
    pub stops: Vec<ReelStop>,
    /// Prize awarded by this game, in credits
    #[serde(default)]
    pub awarded: u64,
    /// Progressive awards hit by this game
    #[serde(default)]
    pub progressives: Vec<ProgressiveAward>,
    /// Feature stage triggered by this game (including retriggers)
    #[serde(default)]
    pub triggered: Option<GameStage>,
    /// Cycle state once the game settled
    #[serde(default)]
    pub cycle_state: CycleState,
}

impl GameOutcome {
    /// Empty outcome for a game played in `stage` that changed nothing
    pub fn quiet(game_number: u64, stage: StagePosition) -> Self {
        Self {
            game_number,
            stage_before: stage.clone(),
            stage_after: stage,
            stops: Vec::new(),
            awarded: 0,
            progressives: Vec::new(),
            triggered: None,
            cycle_state: CycleState::IDLE,
        }
    }

    /// Did the device change stage during this game?
    pub fn transitioned(&self) -> bool {
        self.stage_before != self.stage_after
    }

    /// Was the given progressive tier awarded?
    pub fn awarded_progressive(&self, tier: ProgressiveTier) -> bool {
        self.progressives.iter().any(|p| p.tier == tier)
    }

    /// Total progressive payout, in credits
    pub fn progressive_total(&self) -> u64 {
        self.progressives.iter().map(|p| p.amount).sum()
    }

    /// Stop on the named strip, if the strip was part of this game
    pub fn stop_for(&self, strip: &str) -> Option<&ReelStop> {
        self.stops.iter().find(|s| s.strip == strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_outcome() {
        let outcome = GameOutcome::quiet(4, StagePosition::base());
        assert!(!outcome.transitioned());
        assert_eq!(outcome.progressive_total(), 0);
        assert_eq!(outcome.triggered, None);
    }

    #[test]
    fn test_progressive_lookup() {
        let mut outcome = GameOutcome::quiet(1, StagePosition::base());
        outcome.progressives.push(ProgressiveAward {
            tier: ProgressiveTier::Major,
            amount: 100_000,
        });
        outcome.progressives.push(ProgressiveAward {
            tier: ProgressiveTier::Mini,
            amount: 5_000,
        });
        assert!(outcome.awarded_progressive(ProgressiveTier::Major));
        assert!(!outcome.awarded_progressive(ProgressiveTier::Grand));
        assert_eq!(outcome.progressive_total(), 105_000);
    }

    #[test]
    fn test_transition_detected() {
        let mut outcome = GameOutcome::quiet(2, StagePosition::base());
        outcome.stage_after = StagePosition::new(GameStage::FreeGames, "FG");
        assert!(outcome.transitioned());
    }
}
