//! Conditions — gate step entry and verify step results
//!
//! `StepCondition`s are polled against the live session until they hold.
//! `ResultCondition`s are checked once, against the outcome of the game the
//! step's decision makers constrained. Neither mutates anything.

use std::fmt;

use gf_stage::{CycleState, GameOutcome, GameStage, ProgressiveTier, SessionView};
use serde::{Deserialize, Serialize};

/// Session state a step condition is evaluated against
pub struct ConditionContext<'a> {
    pub session: &'a dyn SessionView,
    /// Session game count when the step started waiting
    pub entered_at_game: u64,
}

impl<'a> ConditionContext<'a> {
    pub fn new(session: &'a dyn SessionView, entered_at_game: u64) -> Self {
        Self {
            session,
            entered_at_game,
        }
    }

    /// Games completed since the step started waiting
    pub fn games_elapsed(&self) -> u64 {
        self.session.game_count().saturating_sub(self.entered_at_game)
    }
}

/// Precondition that must hold before a step applies its decision makers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepCondition {
    /// Session has completed at least `at_least` games
    GameCount { at_least: u64 },
    /// Total awarded prize within `min..=max` (no upper bound when `max` is absent)
    TotalAwardedPrize {
        min: u64,
        #[serde(default)]
        max: Option<u64>,
    },
    /// At least `games` games completed since the step started waiting
    MaxGamesElapsed { games: u64 },
    /// Device reports any of the flags in `mask`
    CycleState { mask: CycleState },
    /// Device is in `stage` (and `label`, when given)
    InStage {
        stage: GameStage,
        #[serde(default)]
        label: Option<String>,
    },
}

impl StepCondition {
    pub fn is_satisfied(&self, ctx: &ConditionContext<'_>) -> bool {
        match self {
            Self::GameCount { at_least } => ctx.session.game_count() >= *at_least,
            Self::TotalAwardedPrize { min, max } => {
                let total = ctx.session.total_awarded();
                total >= *min && max.is_none_or(|m| total <= m)
            }
            Self::MaxGamesElapsed { games } => ctx.games_elapsed() >= *games,
            Self::CycleState { mask } => ctx.session.cycle_state().intersects(*mask),
            Self::InStage { stage, label } => ctx
                .session
                .current_stage()
                .matches(*stage, label.as_deref()),
        }
    }
}

impl fmt::Display for StepCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameCount { at_least } => write!(f, "GameCount >= {at_least}"),
            Self::TotalAwardedPrize { min, max: Some(max) } => {
                write!(f, "TotalAwardedPrize in [{min}, {max}]")
            }
            Self::TotalAwardedPrize { min, max: None } => write!(f, "TotalAwardedPrize >= {min}"),
            Self::MaxGamesElapsed { games } => write!(f, "MaxGamesElapsed({games})"),
            Self::CycleState { mask } => write!(f, "CycleState in {mask}"),
            Self::InStage { stage, label: Some(label) } => write!(f, "InStage({stage} [{label}])"),
            Self::InStage { stage, label: None } => write!(f, "InStage({stage})"),
        }
    }
}

/// Assertion over the outcome a step produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultCondition {
    /// Device ended the game in `stage` (and `label`, when given)
    StageTransition {
        stage: GameStage,
        #[serde(default)]
        label: Option<String>,
    },
    /// The progressive tier was awarded by the game
    ProgressiveAwarded { tier: ProgressiveTier },
    /// The game triggered the feature stage (including a retrigger)
    FeatureTriggered { stage: GameStage },
    /// The game triggered nothing
    NoFurtherTrigger,
}

impl ResultCondition {
    pub fn is_satisfied(&self, outcome: &GameOutcome) -> bool {
        match self {
            Self::StageTransition { stage, label } => {
                outcome.stage_after.matches(*stage, label.as_deref())
            }
            Self::ProgressiveAwarded { tier } => outcome.awarded_progressive(*tier),
            Self::FeatureTriggered { stage } => outcome.triggered == Some(*stage),
            Self::NoFurtherTrigger => outcome.triggered.is_none() && outcome.progressives.is_empty(),
        }
    }
}

impl fmt::Display for ResultCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageTransition { stage, label: Some(label) } => {
                write!(f, "StageTransition({stage} [{label}])")
            }
            Self::StageTransition { stage, label: None } => write!(f, "StageTransition({stage})"),
            Self::ProgressiveAwarded { tier } => write!(f, "ProgressiveAwarded({tier})"),
            Self::FeatureTriggered { stage } => write!(f, "FeatureTriggered({stage})"),
            Self::NoFurtherTrigger => f.write_str("NoFurtherTrigger"),
        }
    }
}
