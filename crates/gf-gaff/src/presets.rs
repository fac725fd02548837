//! Built-in gaff sequences for common certification scenarios
//!
//! Presets address strips and symbols by naming convention: base-game strips
//! start with `BG_`, free-games strips with `FG_`, progressive symbols are
//! `JP_<TIER>`.

use gf_stage::{CycleState, GameStage, ProgressiveTier};

use crate::condition::{ResultCondition, StepCondition};
use crate::decision::{DecisionMaker, SelectionStrategy};
use crate::filter::NameFilter;
use crate::sequence::GaffSequence;
use crate::step::GaffStep;

pub const BASE_STRIP_PREFIX: &str = "BG_";
pub const FEATURE_STRIP_PREFIX: &str = "FG_";
pub const SCATTER: &str = "SCATTER";

/// Scatters needed to trigger free games
pub const TRIGGER_SCATTERS: usize = 3;

pub const FREE_GAMES_TRIGGER: &str = "free_games_trigger";
pub const FREE_GAMES_RETRIGGER: &str = "free_games_retrigger";
pub const WAIT_FOR_BASE_GAME: &str = "wait_for_base_game";
pub const WARM_UP: &str = "warm_up";

/// Symbol that pays the given progressive tier
pub fn progressive_symbol(tier: ProgressiveTier) -> String {
    match tier {
        ProgressiveTier::Custom(n) => format!("JP_{n}"),
        named => format!("JP_{}", named.display_name()),
    }
}

/// Preset name for a progressive tier
pub fn progressive_preset(tier: ProgressiveTier) -> String {
    format!("progressive_{}", tier.display_name().to_ascii_lowercase())
}

/// Get all built-in presets
pub fn all_presets() -> Vec<GaffSequence> {
    let mut presets = vec![free_games_trigger(), free_games_retrigger()];
    for tier in [
        ProgressiveTier::Grand,
        ProgressiveTier::Major,
        ProgressiveTier::Minor,
        ProgressiveTier::Mini,
    ] {
        presets.push(progressive_award(tier));
    }
    presets.push(wait_for_base_game());
    presets.push(warm_up());
    presets
}

fn land_trigger_step() -> GaffStep {
    GaffStep::new("land trigger scatters")
        .when(StepCondition::InStage {
            stage: GameStage::BaseGame,
            label: None,
        })
        .decide(DecisionMaker::select_symbols(
            NameFilter::prefix(BASE_STRIP_PREFIX),
            NameFilter::exact(SCATTER),
            TRIGGER_SCATTERS,
        ))
        .expect(ResultCondition::FeatureTriggered {
            stage: GameStage::FreeGames,
        })
        .expect(ResultCondition::StageTransition {
            stage: GameStage::FreeGames,
            label: None,
        })
}

fn feature_complete_step() -> GaffStep {
    GaffStep::new("back to base game")
        .when(StepCondition::CycleState {
            mask: CycleState::FEATURE_COMPLETE,
        })
        .expect(ResultCondition::StageTransition {
            stage: GameStage::BaseGame,
            label: None,
        })
}

/// Free games trigger: three scatters in the base game
pub fn free_games_trigger() -> GaffSequence {
    GaffSequence::new(FREE_GAMES_TRIGGER)
        .describe("Lands three scatters in the base game and verifies free games start")
        .step(land_trigger_step())
}

/// Free games retrigger: trigger, confirm a retrigger is reachable, retrigger
pub fn free_games_retrigger() -> GaffSequence {
    GaffSequence::new(FREE_GAMES_RETRIGGER)
        .describe("Triggers free games, retriggers on whichever strip set was awarded, plays out")
        .step(land_trigger_step())
        .step(
            GaffStep::new("locate retrigger stops")
                .when(StepCondition::InStage {
                    stage: GameStage::FreeGames,
                    label: None,
                })
                .decide(DecisionMaker::strip_finder(
                    NameFilter::prefix(FEATURE_STRIP_PREFIX),
                    NameFilter::exact(SCATTER),
                    1,
                )),
        )
        .step(
            GaffStep::new("land retrigger scatters")
                .when(StepCondition::InStage {
                    stage: GameStage::FreeGames,
                    label: None,
                })
                // Strip set is picked by the device; cover every set
                .decide(DecisionMaker::multi_strip_finder(
                    NameFilter::prefix(FEATURE_STRIP_PREFIX),
                    NameFilter::exact(SCATTER),
                    TRIGGER_SCATTERS,
                    SelectionStrategy::All,
                ))
                .expect(ResultCondition::FeatureTriggered {
                    stage: GameStage::FreeGames,
                })
                .expect(ResultCondition::StageTransition {
                    stage: GameStage::FreeGames,
                    label: None,
                }),
        )
        .step(feature_complete_step())
}

/// Progressive award: a full line of the tier's symbol in the base game
pub fn progressive_award(tier: ProgressiveTier) -> GaffSequence {
    GaffSequence::new(progressive_preset(tier))
        .describe(format!("Lands a full line of {} and verifies the award", progressive_symbol(tier)))
        .step(
            GaffStep::new(format!("land {} line", progressive_symbol(tier)))
                .when(StepCondition::InStage {
                    stage: GameStage::BaseGame,
                    label: None,
                })
                .decide(DecisionMaker::SelectSymbols {
                    strips: NameFilter::prefix(BASE_STRIP_PREFIX),
                    symbols: NameFilter::exact(progressive_symbol(tier)),
                    count: 5,
                    min: 1,
                    max: 1,
                })
                .expect(ResultCondition::ProgressiveAwarded { tier })
                .expect(ResultCondition::StageTransition {
                    stage: GameStage::Progressive,
                    label: Some(tier.display_name().to_string()),
                }),
        )
        .step(feature_complete_step())
}

/// Wait for base game: passive reset between scenarios
pub fn wait_for_base_game() -> GaffSequence {
    GaffSequence::new(WAIT_FOR_BASE_GAME)
        .describe("Waits until the device is idle in the base game")
        .step(
            GaffStep::new("idle in base game")
                .when(StepCondition::InStage {
                    stage: GameStage::BaseGame,
                    label: None,
                })
                .when(StepCondition::CycleState {
                    mask: CycleState::IDLE,
                }),
        )
}

/// Warm-up: a few free-running games, then one game pinned clear of scatters
pub fn warm_up() -> GaffSequence {
    GaffSequence::new(WARM_UP)
        .describe("Internal: settles a fresh device before scripted scenarios")
        .hide()
        .step(
            GaffStep::new("settle")
                .when(StepCondition::MaxGamesElapsed { games: 5 })
                .when(StepCondition::InStage {
                    stage: GameStage::BaseGame,
                    label: None,
                })
                .decide(DecisionMaker::select_symbols(
                    NameFilter::prefix(BASE_STRIP_PREFIX),
                    NameFilter::exact(SCATTER),
                    0,
                ))
                .expect(ResultCondition::NoFurtherTrigger),
        )
}
