//! In-crate fake device for unit tests

use std::collections::BTreeMap;

use gf_stage::{
    CycleState, GameOutcome, GameStage, ProgressiveAward, ReelStop, SessionSnapshot, SessionView,
    StagePosition,
};

use crate::error::GaffError;
use crate::filter::NameFilter;
use crate::provider::OutcomeProvider;
use crate::sequence::StepDriver;
use crate::strip::{ReelStrip, StripStop};

/// Deterministic device: `choose` always returns 0, pins clear after each game
pub(crate) struct FakeDevice {
    session: SessionSnapshot,
    strips: Vec<ReelStrip>,
    window_height: usize,
    pins: BTreeMap<String, usize>,
    pin_calls: usize,
    triggers: Vec<(String, GameStage)>,
}

impl FakeDevice {
    pub(crate) fn new(window_height: usize, strips: Vec<ReelStrip>) -> Self {
        Self {
            session: SessionSnapshot {
                cycle_state: CycleState::IDLE,
                ..Default::default()
            },
            strips,
            window_height,
            pins: BTreeMap::new(),
            pin_calls: 0,
            triggers: Vec::new(),
        }
    }

    pub(crate) fn pins(&self) -> &BTreeMap<String, usize> {
        &self.pins
    }

    pub(crate) fn pin_calls(&self) -> usize {
        self.pin_calls
    }

    /// Any pinned window showing `symbol` moves the device into `stage`
    pub(crate) fn script_trigger_on(&mut self, symbol: &str, stage: GameStage) {
        self.triggers.push((symbol.to_string(), stage));
    }
}

impl SessionView for FakeDevice {
    fn game_count(&self) -> u64 {
        self.session.game_count()
    }

    fn total_awarded(&self) -> u64 {
        self.session.total_awarded()
    }

    fn cycle_state(&self) -> CycleState {
        self.session.cycle_state()
    }

    fn current_stage(&self) -> StagePosition {
        self.session.current_stage()
    }

    fn progressive_history(&self) -> &[ProgressiveAward] {
        self.session.progressive_history()
    }

    fn last_outcome(&self) -> Option<&GameOutcome> {
        self.session.last_outcome()
    }
}

impl OutcomeProvider for FakeDevice {
    fn strips(&self) -> &[ReelStrip] {
        &self.strips
    }

    fn window_height(&self) -> usize {
        self.window_height
    }

    fn pinned(&self, strip: &str) -> Option<usize> {
        self.pins.get(strip).copied()
    }

    fn pin(&mut self, stop: StripStop) -> Result<(), GaffError> {
        if !self.strips.iter().any(|s| s.name == stop.strip) {
            return Err(GaffError::Device(format!("unknown strip '{}'", stop.strip)));
        }
        self.pin_calls += 1;
        self.pins.insert(stop.strip, stop.position);
        Ok(())
    }

    fn clear_pins(&mut self) {
        self.pins.clear();
    }

    fn choose(&mut self, _choices: usize) -> usize {
        0
    }
}

impl StepDriver for FakeDevice {
    fn play_game(&mut self) -> Result<GameOutcome, GaffError> {
        let number = self.session.game_count + 1;
        let mut outcome = GameOutcome::quiet(number, self.session.stage.clone());
        for strip in &self.strips {
            let position = self.pins.get(&strip.name).copied().unwrap_or(0);
            outcome.stops.push(ReelStop {
                strip: strip.name.clone(),
                position,
                symbols: strip
                    .window(position, self.window_height)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }

        for (symbol, stage) in &self.triggers {
            let filter = NameFilter::exact(symbol.clone());
            let shown = self.strips.iter().any(|s| {
                self.pins
                    .get(&s.name)
                    .is_some_and(|&p| s.count_in_window(p, self.window_height, &filter) > 0)
            });
            if shown {
                outcome.triggered = Some(*stage);
                outcome.stage_after = StagePosition::new(*stage, stage.display_name());
            }
        }

        self.pins.clear();
        self.session.record(outcome.clone());
        Ok(outcome)
    }
}
