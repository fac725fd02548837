//! Gaff sequence — named, ordered steps run against a device
//!
//! ## Key Components
//!
//! - `GaffSequence`: immutable step list
//! - `SequenceRun`: tick-level state machine over one sequence
//! - `StepDriver`: the device harness a run is driven through
//! - `SequenceReport`: evidence of what each step waited for and pinned
//!
//! The harness calls [`SequenceRun::poll`] before every game and
//! [`SequenceRun::observe`] after it. [`GaffSequence::run`] does exactly that
//! until the sequence completes or fails.

use serde::{Deserialize, Serialize};

use gf_stage::{GameOutcome, SessionView};

use crate::condition::ConditionContext;
use crate::config::RunnerConfig;
use crate::decision::Decision;
use crate::error::{GaffError, SequenceError};
use crate::provider::OutcomeProvider;
use crate::step::{GaffStep, StepState};

/// Device harness: session reads, outcome control, and one game per call
pub trait StepDriver: SessionView + OutcomeProvider {
    /// Play one game cycle honouring any pinned stops, then clear the pins
    fn play_game(&mut self) -> Result<GameOutcome, GaffError>;
}

/// A scripted scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaffSequence {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Internal sequences are left out of user-facing listings
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub steps: Vec<GaffStep>,
}

impl GaffSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            hidden: false,
            steps: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: mark hidden
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Builder: append a step
    pub fn step(mut self, step: GaffStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Reject sequences no device could run
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("sequence name is empty".to_string());
        }
        for step in &self.steps {
            step.validate()
                .map_err(|e| format!("sequence '{}': {e}", self.name))?;
        }
        Ok(())
    }

    /// Run every step to completion against the driver
    pub fn run<D: StepDriver>(
        &self,
        driver: &mut D,
        config: &RunnerConfig,
    ) -> Result<SequenceReport, SequenceError> {
        let mut run = SequenceRun::new(self).with_max_wait(config.max_wait_games);
        loop {
            match run.poll(driver)? {
                RunStatus::Complete => return Ok(run.into_report()),
                RunStatus::Waiting { .. } | RunStatus::AwaitingOutcome { .. } => {
                    let outcome = driver.play_game().map_err(|e| run.fail(e))?;
                    run.observe(&outcome)?;
                }
            }
        }
    }
}

/// What a run needs next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Step conditions unmet; play a game and poll again
    Waiting { step: usize },
    /// Decision makers applied; play the constrained game and observe it
    AwaitingOutcome { step: usize },
    /// Every step verified
    Complete,
}

/// Evidence for one verified step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepReport {
    pub step: String,
    /// Games played while the step waited on its conditions
    pub waited_games: u64,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    /// Game the result conditions were checked against
    #[serde(default)]
    pub verified_game: Option<u64>,
}

/// Evidence for a completed sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceReport {
    pub sequence: String,
    pub steps: Vec<StepReport>,
}

/// One execution of a sequence, advanced tick by tick
#[derive(Debug)]
pub struct SequenceRun<'s> {
    sequence: &'s GaffSequence,
    index: usize,
    state: StepState,
    entered_at_game: u64,
    max_wait_games: Option<u64>,
    current: StepReport,
    completed: Vec<StepReport>,
    failure: Option<SequenceError>,
}

impl<'s> SequenceRun<'s> {
    pub fn new(sequence: &'s GaffSequence) -> Self {
        Self {
            sequence,
            index: 0,
            state: StepState::Pending,
            entered_at_game: 0,
            max_wait_games: None,
            current: StepReport::default(),
            completed: Vec::new(),
            failure: None,
        }
    }

    /// Fail a step that has waited this many games
    pub fn with_max_wait(mut self, games: Option<u64>) -> Self {
        self.max_wait_games = games;
        self
    }

    /// Index of the step being run (equals the step count once complete)
    pub fn current_step(&self) -> usize {
        self.index
    }

    pub fn current_step_name(&self) -> Option<&str> {
        self.sequence.steps.get(self.index).map(|s| s.name.as_str())
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.sequence.steps.len()
    }

    pub fn completed_steps(&self) -> &[StepReport] {
        &self.completed
    }

    pub fn into_report(self) -> SequenceReport {
        SequenceReport {
            sequence: self.sequence.name.clone(),
            steps: self.completed,
        }
    }

    /// Record a failure of the current step
    pub fn fail(&mut self, source: GaffError) -> SequenceError {
        self.state = StepState::Failed;
        let error = SequenceError {
            sequence: self.sequence.name.clone(),
            step: self
                .current_step_name()
                .unwrap_or("<complete>")
                .to_string(),
            source,
        };
        log::warn!("{error}");
        self.failure = Some(error.clone());
        error
    }

    /// Advance as far as possible before the next game
    pub fn poll<D: StepDriver>(&mut self, driver: &mut D) -> Result<RunStatus, SequenceError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        let sequence = self.sequence;

        loop {
            let Some(step) = sequence.steps.get(self.index) else {
                return Ok(RunStatus::Complete);
            };

            match self.state {
                StepState::Pending => {
                    self.entered_at_game = driver.game_count();
                    self.current = StepReport {
                        step: step.name.clone(),
                        ..Default::default()
                    };
                    log::info!(
                        "[{}] step {} '{}' entered at game {}",
                        self.sequence.name,
                        self.index + 1,
                        step.name,
                        self.entered_at_game
                    );
                    self.state = StepState::Waiting;
                }
                StepState::Waiting => {
                    let ctx = ConditionContext::new(&*driver, self.entered_at_game);
                    self.current.waited_games = ctx.games_elapsed();
                    if step.is_ready(&ctx) {
                        self.state = StepState::Ready;
                        continue;
                    }

                    let unmet = describe_unmet(step, &ctx);
                    let waited = ctx.games_elapsed();
                    if let Some(limit) = self.max_wait_games {
                        if waited >= limit {
                            return Err(self.fail(GaffError::ConditionUnmetTimeout {
                                waited_games: waited,
                                conditions: unmet,
                            }));
                        }
                    }
                    log::debug!("[{}] '{}' waiting on {unmet}", self.sequence.name, step.name);
                    return Ok(RunStatus::Waiting { step: self.index });
                }
                StepState::Ready => {
                    if step.is_passive() {
                        if !step.result_conditions.is_empty() {
                            let verdict = match driver.last_outcome() {
                                Some(outcome) => {
                                    self.current.verified_game = Some(outcome.game_number);
                                    step.verify(outcome)
                                }
                                None => Err(GaffError::ResultUnmet {
                                    condition: "no game has been played yet".to_string(),
                                }),
                            };
                            if let Err(e) = verdict {
                                return Err(self.fail(e));
                            }
                        }
                        self.state = StepState::Verified;
                        continue;
                    }

                    match step.apply(driver) {
                        Ok(decisions) => {
                            self.current.decisions = decisions;
                            self.state = StepState::Applied;
                            log::info!(
                                "[{}] '{}' applied {} decision maker(s)",
                                self.sequence.name,
                                step.name,
                                step.decision_makers.len()
                            );
                        }
                        Err(e) => return Err(self.fail(e)),
                    }
                }
                StepState::Applied => {
                    return Ok(RunStatus::AwaitingOutcome { step: self.index });
                }
                StepState::Verified => {
                    log::info!("[{}] '{}' verified", self.sequence.name, step.name);
                    self.completed.push(std::mem::take(&mut self.current));
                    self.index += 1;
                    self.state = StepState::Pending;
                    if self.is_complete() {
                        log::info!("[{}] sequence complete", self.sequence.name);
                    }
                }
                StepState::Failed => {
                    // fail() always records the failure, returned above
                    return Ok(RunStatus::Waiting { step: self.index });
                }
            }
        }
    }

    /// Feed the outcome of the game played after the last poll
    pub fn observe(&mut self, outcome: &GameOutcome) -> Result<(), SequenceError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        let sequence = self.sequence;
        let Some(step) = sequence.steps.get(self.index) else {
            return Ok(());
        };

        if self.state == StepState::Applied {
            self.current.verified_game = Some(outcome.game_number);
            match step.verify(outcome) {
                Ok(()) => self.state = StepState::Verified,
                Err(e) => return Err(self.fail(e)),
            }
        }
        Ok(())
    }
}

fn describe_unmet(step: &GaffStep, ctx: &ConditionContext<'_>) -> String {
    step.unmet_conditions(ctx)
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
