//! Simulated Device — deterministic slot machine under gaff control
//!
//! Plays one game per [`StepDriver::play_game`] call on the strip set of the
//! current stage. Stops pinned through [`OutcomeProvider::pin`] are honoured
//! for the next game only; every other strip stops where the seeded RNG puts
//! it.
//!
//! ## Game rules
//!
//! - Base game: `trigger_scatters` or more scatters in view trigger free games
//!   on a feature strip set picked by the RNG (the set name is the stage label).
//!   Otherwise a progressive symbol in view on every strip awards that tier.
//! - Free games: each game pays `free_game_prize`; scatters retrigger and add
//!   `free_games_awarded` more games. The last game returns to the base game.
//! - Progressive: one presentation game, then back to the base game.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use gf_gaff::{GaffError, NameFilter, OutcomeProvider, ReelStrip, StepDriver, StripStop};
use gf_stage::{
    CycleState, GameOutcome, GameStage, ProgressiveAward, ReelStop, SessionSnapshot, SessionView,
    StagePosition,
};

use crate::config::{LabConfig, LabError, ProgressiveSymbol};
use crate::symbols::generate_strip_set;

/// Device statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub games: u64,
    pub base_games: u64,
    pub free_games: u64,
    /// Credits wagered on base games
    pub wagered: u64,
    pub features_triggered: u64,
    pub retriggers: u64,
    pub progressives_won: u64,
    /// Games that used at least one pinned stop
    pub gaffed_games: u64,
}

pub struct SimulatedDevice {
    config: LabConfig,
    strips: Vec<ReelStrip>,
    rng: ChaCha8Rng,
    session: SessionSnapshot,
    pins: BTreeMap<String, usize>,
    free_games_left: u32,
    stats: DeviceStats,
}

impl SimulatedDevice {
    pub fn new(config: LabConfig) -> Result<Self, LabError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut strips = generate_strip_set(
            &mut rng,
            &config.base_set,
            config.reels,
            config.strip_length,
            &config.base_specials(),
        );
        for set in &config.feature_sets {
            strips.extend(generate_strip_set(
                &mut rng,
                set,
                config.reels,
                config.strip_length,
                &config.feature_specials(),
            ));
        }
        log::debug!(
            "Simulated device: {} strips, seed {}",
            strips.len(),
            config.seed
        );

        Ok(Self {
            config,
            strips,
            rng,
            session: SessionSnapshot {
                cycle_state: CycleState::IDLE,
                ..Default::default()
            },
            pins: BTreeMap::new(),
            free_games_left: 0,
            stats: DeviceStats::default(),
        })
    }

    /// Default device with the given seed
    pub fn seeded(seed: u64) -> Result<Self, LabError> {
        Self::new(LabConfig::with_seed(seed))
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn stats(&self) -> &DeviceStats {
        &self.stats
    }

    pub fn session(&self) -> &SessionSnapshot {
        &self.session
    }

    pub fn free_games_remaining(&self) -> u32 {
        self.free_games_left
    }

    /// Strips spun in the current stage
    pub fn active_set(&self) -> &str {
        match self.session.stage.stage {
            GameStage::FreeGames => &self.session.stage.label,
            _ => &self.config.base_set,
        }
    }

    fn scatters_in_view(&self, stops: &[ReelStop]) -> usize {
        stops
            .iter()
            .flat_map(|s| s.symbols.iter())
            .filter(|s| **s == self.config.scatter_symbol)
            .count()
    }

    /// Highest tier whose symbol is in view on every strip
    fn progressive_line(&self, stops: &[ReelStop]) -> Option<&ProgressiveSymbol> {
        if stops.is_empty() {
            return None;
        }
        self.config
            .progressives
            .iter()
            .filter(|p| stops.iter().all(|s| s.symbols.contains(&p.symbol)))
            .max_by_key(|p| p.tier.level())
    }

    fn spin_active_set(&mut self) -> Vec<ReelStop> {
        let set = self.active_set().to_string();
        let height = self.config.window_height;
        let mut gaffed = false;
        let mut stops = Vec::with_capacity(self.config.reels);

        for strip in self.strips.iter().filter(|s| s.set == set) {
            let position = match self.pins.get(&strip.name) {
                Some(&pinned) => {
                    gaffed = true;
                    pinned
                }
                None => self.rng.random_range(0..strip.len()),
            };
            stops.push(ReelStop {
                strip: strip.name.clone(),
                position,
                symbols: strip
                    .window(position, height)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }

        let ignored: Vec<&String> = self
            .pins
            .keys()
            .filter(|name| !stops.iter().any(|s| &s.strip == *name))
            .collect();
        if !ignored.is_empty() {
            log::debug!("Pins outside strip set '{set}' ignored: {ignored:?}");
        }
        if gaffed {
            self.stats.gaffed_games += 1;
        }
        stops
    }
}

impl SessionView for SimulatedDevice {
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

impl OutcomeProvider for SimulatedDevice {
    fn strips(&self) -> &[ReelStrip] {
        &self.strips
    }

    fn window_height(&self) -> usize {
        self.config.window_height
    }

    fn pinned(&self, strip: &str) -> Option<usize> {
        self.pins.get(strip).copied()
    }

    fn pin(&mut self, stop: StripStop) -> Result<(), GaffError> {
        let Some(strip) = self.strips.iter().find(|s| s.name == stop.strip) else {
            return Err(GaffError::Device(format!("unknown strip '{}'", stop.strip)));
        };
        if stop.position >= strip.len() {
            return Err(GaffError::Device(format!(
                "stop {} out of range for strip '{}' ({} stops)",
                stop.position,
                stop.strip,
                strip.len()
            )));
        }
        log::debug!("Pinned {} at {}", stop.strip, stop.position);
        self.pins.insert(stop.strip, stop.position);
        Ok(())
    }

    fn clear_pins(&mut self) {
        if !self.pins.is_empty() {
            log::debug!("Cleared {} pin(s)", self.pins.len());
        }
        self.pins.clear();
    }

    fn choose(&mut self, choices: usize) -> usize {
        self.rng.random_range(0..choices.max(1))
    }
}

impl StepDriver for SimulatedDevice {
    fn play_game(&mut self) -> Result<GameOutcome, GaffError> {
        let stage_before = self.session.stage.clone();
        let stops = self.spin_active_set();
        let scatters = self.scatters_in_view(&stops);

        let mut outcome = GameOutcome::quiet(self.session.game_count + 1, stage_before.clone());
        outcome.stops = stops;
        self.stats.games += 1;

        match stage_before.stage {
            GameStage::BaseGame => {
                self.stats.base_games += 1;
                self.stats.wagered += self.config.game_cost;

                if scatters >= self.config.trigger_scatters {
                    let pick = self.rng.random_range(0..self.config.feature_sets.len());
                    let set = self.config.feature_sets[pick].clone();
                    self.free_games_left = self.config.free_games_awarded;
                    self.stats.features_triggered += 1;
                    log::info!(
                        "Game {}: {scatters} scatters, {} free games on {set}",
                        outcome.game_number,
                        self.free_games_left
                    );
                    outcome.triggered = Some(GameStage::FreeGames);
                    outcome.stage_after = StagePosition::new(GameStage::FreeGames, set);
                    outcome.cycle_state = CycleState::FEATURE_PENDING;
                } else if let Some(line) = self.progressive_line(&outcome.stops).cloned() {
                    self.stats.progressives_won += 1;
                    log::info!("Game {}: {} progressive", outcome.game_number, line.tier);
                    outcome.progressives.push(ProgressiveAward {
                        tier: line.tier,
                        amount: line.amount,
                    });
                    outcome.triggered = Some(GameStage::Progressive);
                    outcome.stage_after =
                        StagePosition::new(GameStage::Progressive, line.tier.display_name());
                    outcome.cycle_state = CycleState::PROGRESSIVE_PENDING;
                } else {
                    outcome.cycle_state = CycleState::IDLE;
                }
            }
            GameStage::FreeGames => {
                self.stats.free_games += 1;
                self.free_games_left = self.free_games_left.saturating_sub(1);
                outcome.awarded = self.config.free_game_prize;

                if scatters >= self.config.trigger_scatters {
                    self.free_games_left += self.config.free_games_awarded;
                    self.stats.retriggers += 1;
                    log::info!(
                        "Game {}: retrigger, {} free games left",
                        outcome.game_number,
                        self.free_games_left
                    );
                    outcome.triggered = Some(GameStage::FreeGames);
                }

                if self.free_games_left == 0 {
                    outcome.stage_after = StagePosition::base();
                    outcome.cycle_state = CycleState::FEATURE_COMPLETE | CycleState::IDLE;
                } else {
                    outcome.cycle_state = CycleState::IN_FEATURE;
                }
            }
            GameStage::Progressive | GameStage::Bonus => {
                outcome.stage_after = StagePosition::base();
                outcome.cycle_state = CycleState::FEATURE_COMPLETE | CycleState::IDLE;
            }
        }

        self.pins.clear();
        self.session.record(outcome.clone());
        Ok(outcome)
    }
}

/// Symbols in view on the named strip, for diagnostics
pub fn symbols_in_view(outcome: &GameOutcome, strip: &str, symbols: &NameFilter) -> usize {
    outcome
        .stop_for(strip)
        .map(|s| s.symbols.iter().filter(|name| symbols.matches(name)).count())
        .unwrap_or(0)
}
