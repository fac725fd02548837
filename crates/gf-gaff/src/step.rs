//! Gaff step — one stage of a scripted scenario
//!
//! ```text
//! Pending ──► Waiting ──► Ready ──► Applied ──► Verified
//!               ▲  │                   │
//!               └──┘ (per tick)        └──► Failed
//! ```

use serde::{Deserialize, Serialize};

use crate::condition::{ConditionContext, ResultCondition, StepCondition};
use crate::decision::{Decision, DecisionMaker};
use crate::error::GaffError;
use crate::provider::OutcomeProvider;
use gf_stage::GameOutcome;

/// Lifecycle state of a step inside a running sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Not yet evaluated
    Pending,
    /// Step conditions unmet; re-evaluated on the next tick
    Waiting,
    /// Step conditions met
    Ready,
    /// Decision makers applied; waiting for the constrained game
    Applied,
    /// Result conditions held
    Verified,
    /// A decision maker or result condition failed
    Failed,
}

/// A named step: preconditions, decision makers, postconditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaffStep {
    pub name: String,
    #[serde(default)]
    pub decision_makers: Vec<DecisionMaker>,
    #[serde(default)]
    pub result_conditions: Vec<ResultCondition>,
    #[serde(default)]
    pub step_conditions: Vec<StepCondition>,
}

impl GaffStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decision_makers: Vec::new(),
            result_conditions: Vec::new(),
            step_conditions: Vec::new(),
        }
    }

    /// Builder: add a decision maker (applied in insertion order)
    pub fn decide(mut self, maker: DecisionMaker) -> Self {
        self.decision_makers.push(maker);
        self
    }

    /// Builder: add a result condition
    pub fn expect(mut self, condition: ResultCondition) -> Self {
        self.result_conditions.push(condition);
        self
    }

    /// Builder: add a step condition
    pub fn when(mut self, condition: StepCondition) -> Self {
        self.step_conditions.push(condition);
        self
    }

    /// Step conditions that do not hold right now
    pub fn unmet_conditions(&self, ctx: &ConditionContext<'_>) -> Vec<&StepCondition> {
        self.step_conditions
            .iter()
            .filter(|c| !c.is_satisfied(ctx))
            .collect()
    }

    pub fn is_ready(&self, ctx: &ConditionContext<'_>) -> bool {
        self.step_conditions.iter().all(|c| c.is_satisfied(ctx))
    }

    /// Nothing to apply: results are checked against the latest game
    pub fn is_passive(&self) -> bool {
        self.decision_makers.is_empty()
    }

    /// Apply decision makers in order; the first failure aborts
    ///
    /// A failure clears every pin placed so far, so the next draw is not
    /// forced by a half-applied step.
    pub fn apply<P: OutcomeProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> Result<Vec<Decision>, GaffError> {
        let mut decisions = Vec::with_capacity(self.decision_makers.len());
        for maker in &self.decision_makers {
            match maker.apply(provider) {
                Ok(decision) => decisions.push(decision),
                Err(e) => {
                    provider.clear_pins();
                    return Err(e);
                }
            }
        }
        Ok(decisions)
    }

    /// Check every result condition against the outcome
    pub fn verify(&self, outcome: &GameOutcome) -> Result<(), GaffError> {
        match self
            .result_conditions
            .iter()
            .find(|c| !c.is_satisfied(outcome))
        {
            Some(condition) => Err(GaffError::ResultUnmet {
                condition: format!("{condition} (game {})", outcome.game_number),
            }),
            None => Ok(()),
        }
    }

    /// Reject step definitions no device could run
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("step name is empty".to_string());
        }
        for maker in &self.decision_makers {
            maker
                .validate()
                .map_err(|e| format!("step '{}': {e}", self.name))?;
        }
        Ok(())
    }
}
