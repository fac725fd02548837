//! Sequence registry — ordered, read-only, built once

use serde::{Deserialize, Serialize};

use crate::error::GaffError;
use crate::presets;
use crate::sequence::GaffSequence;

/// Every sequence a harness can run, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaffSequences {
    sequences: Vec<GaffSequence>,
}

impl GaffSequences {
    /// Build from a list; a repeated name keeps the first definition
    pub fn new(sequences: impl IntoIterator<Item = GaffSequence>) -> Self {
        let mut kept: Vec<GaffSequence> = Vec::new();
        for sequence in sequences {
            if kept.iter().any(|s| s.name == sequence.name) {
                log::warn!(
                    "Sequence '{}' registered twice; keeping the first definition",
                    sequence.name
                );
                continue;
            }
            kept.push(sequence);
        }
        Self { sequences: kept }
    }

    /// Registry holding the built-in presets only
    pub fn with_presets() -> Self {
        Self::new(presets::all_presets())
    }

    /// Built-in presets followed by `extra`
    pub fn with_presets_and(extra: impl IntoIterator<Item = GaffSequence>) -> Self {
        Self::new(presets::all_presets().into_iter().chain(extra))
    }

    /// Every sequence, hidden ones included
    pub fn get_sequences(&self) -> &[GaffSequence] {
        &self.sequences
    }

    /// Get sequence by name
    pub fn get(&self, name: &str) -> Option<&GaffSequence> {
        self.sequences.iter().find(|s| s.name == name)
    }

    /// Get sequence by name or fail with `UnknownSequence`
    pub fn require(&self, name: &str) -> Result<&GaffSequence, GaffError> {
        self.get(name)
            .ok_or_else(|| GaffError::UnknownSequence(name.to_string()))
    }

    /// Sequences meant for user-facing listings
    pub fn visible(&self) -> impl Iterator<Item = &GaffSequence> {
        self.sequences.iter().filter(|s| !s.hidden)
    }

    /// List all sequence names
    pub fn names(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Validate every sequence, naming the first bad one
    pub fn validate(&self) -> Result<(), String> {
        self.sequences.iter().try_for_each(GaffSequence::validate)
    }
}
