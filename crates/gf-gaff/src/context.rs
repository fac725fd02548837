//! Gaff context — everything a harness reads, built once at startup
//!
//! Replaces process-wide tables: the selector table, the sequence registry and
//! the runner policy travel together in one immutable value that callers pass
//! around (or share behind an `Arc` across certification jobs).

use gf_select::{InputValue, Inputs, SelectError, SelectorTable};

use crate::config::{GaffConfig, RunnerConfig};
use crate::error::SequenceError;
use crate::registry::GaffSequences;
use crate::sequence::{SequenceReport, StepDriver};

#[derive(Debug, Clone)]
pub struct GaffContext<P> {
    pub selector: SelectorTable<P>,
    pub sequences: GaffSequences,
    pub runner: RunnerConfig,
}

impl<P> GaffContext<P> {
    pub fn new(selector: SelectorTable<P>, sequences: GaffSequences, runner: RunnerConfig) -> Self {
        Self {
            selector,
            sequences,
            runner,
        }
    }

    pub fn from_config(selector: SelectorTable<P>, config: &GaffConfig) -> Self {
        Self::new(selector, config.registry(), config.runner)
    }

    /// Pick the payload matching the inputs
    pub fn select<I: Inputs + ?Sized>(&self, inputs: &I) -> Result<&P, SelectError> {
        self.selector.select(inputs)
    }

    /// Run a registered sequence against a device
    pub fn run<D: StepDriver>(&self, name: &str, driver: &mut D) -> Result<SequenceReport, SequenceError> {
        let sequence = self.sequences.require(name).map_err(|source| SequenceError {
            sequence: name.to_string(),
            step: "<none>".to_string(),
            source,
        })?;
        sequence.run(driver, &self.runner)
    }

    /// Hints the selector table reads, for diagnostics
    pub fn selector_hints(&self) -> Vec<&str> {
        let mut hints: Vec<&str> = self
            .selector
            .records()
            .iter()
            .flat_map(|r| r.requirements.iter().map(|q| q.hint.as_str()))
            .collect();
        hints.sort_unstable();
        hints.dedup();
        hints
    }

    /// Hints the inputs do not supply
    pub fn missing_hints<I: Inputs + ?Sized>(&self, inputs: &I) -> Vec<String> {
        self.selector_hints()
            .into_iter()
            .filter(|hint| inputs.get(hint).is_none())
            .map(str::to_string)
            .collect()
    }
}

/// Value lookup helper used by harnesses that only know one hint
pub fn single_input(hint: &str, value: impl Into<InputValue>) -> gf_select::InputMap {
    gf_select::InputMap::new().with(hint, value)
}
