//! Built-in sequences run end to end against the simulated device

use gf_gaff::{
    DecisionMaker, GaffContext, GaffError, GaffSequence, GaffSequences, GaffStep, NameFilter,
    OutcomeProvider, ResultCondition, RunnerConfig, StepDriver, presets,
};
use gf_lab::{LabConfig, SimulatedDevice};
use gf_select::{InputMap, Requirement, SelectorRecord, SelectorTable};
use gf_stage::{GameStage, ProgressiveTier, SessionView, StagePosition};

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

const SEEDS: [u64; 6] = [1, 2, 3, 17, 42, 1234];

fn device(seed: u64) -> SimulatedDevice {
    SimulatedDevice::seeded(seed).unwrap()
}

fn run(name: &str, device: &mut SimulatedDevice) -> gf_gaff::SequenceReport {
    let registry = GaffSequences::with_presets();
    registry
        .require(name)
        .unwrap()
        .run(device, &RunnerConfig::default())
        .unwrap_or_else(|e| panic!("{name}: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRESETS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_preset_passes_across_seeds() {
    let registry = GaffSequences::with_presets();
    for seed in SEEDS {
        for sequence in registry.get_sequences() {
            let mut device = device(seed);
            if let Err(e) = sequence.run(&mut device, &RunnerConfig::default()) {
                panic!("seed {seed}: {e}");
            }
        }
    }
}

#[test]
fn test_free_games_trigger_report() {
    let mut device = device(42);
    let report = run(presets::FREE_GAMES_TRIGGER, &mut device);

    assert_eq!(report.steps.len(), 1);
    let step = &report.steps[0];
    assert_eq!(step.verified_game, Some(1));
    assert_eq!(step.waited_games, 0);
    assert_eq!(step.decisions[0].pinned.len(), 5);

    let stage = device.current_stage();
    assert_eq!(stage.stage, GameStage::FreeGames);
    assert!(device.config().feature_sets.contains(&stage.label));
    assert_eq!(device.free_games_remaining(), 8);
}

#[test]
fn test_retrigger_plays_out_feature() {
    for seed in SEEDS {
        let mut device = device(seed);
        let report = run(presets::FREE_GAMES_RETRIGGER, &mut device);

        assert_eq!(report.steps.len(), 4);
        // Finder step locates stops without pinning
        assert!(report.steps[1].decisions[0].pinned.is_empty());
        assert!(!report.steps[1].decisions[0].found.is_empty());
        // Both feature sets pinned: 5 strips each
        assert_eq!(report.steps[2].decisions[0].pinned.len(), 10);

        assert!(device.stats().retriggers >= 1);
        assert_eq!(device.current_stage(), StagePosition::base());
        assert_eq!(device.free_games_remaining(), 0);
        // Every free game paid
        assert_eq!(
            device.total_awarded(),
            device.stats().free_games * device.config().free_game_prize
        );
    }
}

#[test]
fn test_progressive_presets_award_their_tier() {
    for tier in [
        ProgressiveTier::Grand,
        ProgressiveTier::Major,
        ProgressiveTier::Minor,
        ProgressiveTier::Mini,
    ] {
        let mut device = device(7);
        run(&presets::progressive_preset(tier), &mut device);

        let history = device.progressive_history();
        assert_eq!(history.len(), 1, "{tier}");
        assert_eq!(history[0].tier, tier);
        assert_eq!(device.current_stage(), StagePosition::base());
        assert_eq!(device.game_count(), 2);
    }
}

#[test]
fn test_wait_for_base_game_is_immediate_on_fresh_device() {
    let mut device = device(3);
    let report = run(presets::WAIT_FOR_BASE_GAME, &mut device);
    assert_eq!(report.steps[0].waited_games, 0);
    assert_eq!(device.game_count(), 0);
}

#[test]
fn test_hidden_warm_up_runs() {
    let mut device = device(9);
    let report = run(presets::WARM_UP, &mut device);
    assert!(report.steps[0].waited_games >= 5);
    let last = device.last_outcome().unwrap();
    assert!(last.triggered.is_none());
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHAINING AND DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_sequences_chain_on_one_device() {
    let mut device = device(5);
    run(presets::WARM_UP, &mut device);
    run(presets::FREE_GAMES_TRIGGER, &mut device);
    assert_eq!(device.current_stage().stage, GameStage::FreeGames);

    // Waits out the free games
    let report = run(presets::WAIT_FOR_BASE_GAME, &mut device);
    assert!(report.steps[0].waited_games >= 8);
    assert_eq!(device.current_stage(), StagePosition::base());
}

#[test]
fn test_same_seed_same_report() {
    let a = run(presets::FREE_GAMES_RETRIGGER, &mut device(77));
    let b = run(presets::FREE_GAMES_RETRIGGER, &mut device(77));
    assert_eq!(a, b);
}

#[test]
fn test_symbol_missing_from_strips_is_unsatisfiable() {
    let sequence = GaffSequence::new("grand in free games").step(
        GaffStep::new("grand line on FG")
            .decide(DecisionMaker::select_symbols(
                NameFilter::prefix(presets::FEATURE_STRIP_PREFIX),
                NameFilter::exact("JP_GRAND"),
                5,
            ))
            .expect(ResultCondition::ProgressiveAwarded {
                tier: ProgressiveTier::Grand,
            }),
    );
    let mut device = device(1);
    let err = sequence
        .run(&mut device, &RunnerConfig::default())
        .unwrap_err();
    assert_eq!(err.step, "grand line on FG");
    assert!(matches!(err.source, GaffError::Unsatisfiable { .. }));
    assert_eq!(device.game_count(), 0);
}

#[test]
fn test_failed_step_does_not_gaff_later_games() {
    let sequence = GaffSequence::new("scatters then missing symbol").step(
        GaffStep::new("half applied")
            .decide(DecisionMaker::select_symbols(
                NameFilter::prefix(presets::BASE_STRIP_PREFIX),
                NameFilter::exact(presets::SCATTER),
                3,
            ))
            .decide(DecisionMaker::select_symbols(
                NameFilter::prefix(presets::BASE_STRIP_PREFIX),
                NameFilter::exact("NOT_ON_STRIP"),
                1,
            )),
    );
    let mut device = device(1);
    let err = sequence
        .run(&mut device, &RunnerConfig::default())
        .unwrap_err();
    assert!(matches!(err.source, GaffError::Unsatisfiable { .. }));

    for reel in 1..=5 {
        assert!(device.pinned(&format!("BG_R{reel}")).is_none());
    }
    device.play_game().unwrap();
    assert_eq!(device.stats().gaffed_games, 0);
}

#[test]
fn test_custom_device_config() {
    let config = LabConfig {
        free_games_awarded: 2,
        ..LabConfig::with_seed(11)
    };
    let mut device = SimulatedDevice::new(config).unwrap();
    run(presets::FREE_GAMES_RETRIGGER, &mut device);
    assert_eq!(device.current_stage(), StagePosition::base());
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_context_selects_then_runs() {
    // Denomination picks which scenario the certification job runs
    let table = SelectorTable::new(
        "denom_scenarios",
        vec![
            SelectorRecord::new(
                vec![Requirement::one_of("Denom", [1, 2, 5])],
                presets::FREE_GAMES_TRIGGER.to_string(),
            ),
            SelectorRecord::new(
                vec![Requirement::at_least("Denom", 100)],
                presets::progressive_preset(ProgressiveTier::Grand),
            ),
        ],
    );
    let ctx = GaffContext::new(table, GaffSequences::with_presets(), RunnerConfig::default());

    let name = ctx.select(&InputMap::new().with("Denom", 100)).unwrap().clone();
    let mut device = device(21);
    let report = ctx.run(&name, &mut device).unwrap();
    assert_eq!(report.sequence, "progressive_grand");
    assert_eq!(device.progressive_history()[0].tier, ProgressiveTier::Grand);

    assert!(ctx.select(&InputMap::new().with("Denom", 50)).is_err());
}
