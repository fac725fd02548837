//! Selector Table — first-match-wins lookup over prioritized records

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::input::Inputs;
use crate::requirement::Requirement;

/// What a zero-requirement record means when it is not at index 0
///
/// A catch-all at index 0 always wins immediately, before any scan. The two
/// policies differ only for catch-alls further down the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Only index 0 may be a catch-all; zero-requirement records elsewhere
    /// never match
    #[default]
    LeadingOnly,
    /// A zero-requirement record matches wherever the scan reaches it
    AnyPosition,
}

/// One row: AND-ed requirements and the payload they select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorRecord<P> {
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    pub payload: P,
}

impl<P> SelectorRecord<P> {
    pub fn new(requirements: Vec<Requirement>, payload: P) -> Self {
        Self {
            requirements,
            payload,
        }
    }

    /// Record with no requirements
    pub fn fallback(payload: P) -> Self {
        Self::new(Vec::new(), payload)
    }

    pub fn is_unconditional(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Every requirement is met (short-circuits on the first miss)
    pub fn matches<I: Inputs + ?Sized>(&self, inputs: &I) -> bool {
        self.requirements.iter().all(|r| r.is_met(inputs))
    }
}

/// Ordered, immutable table of selector records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorTable<P> {
    #[serde(default = "default_table_name")]
    name: String,
    #[serde(default)]
    fallback: FallbackPolicy,
    records: Vec<SelectorRecord<P>>,
}

fn default_table_name() -> String {
    "selector".to_string()
}

impl<P> SelectorTable<P> {
    /// Build a table with the default fallback policy
    pub fn new(name: impl Into<String>, records: Vec<SelectorRecord<P>>) -> Self {
        Self::with_policy(name, FallbackPolicy::default(), records)
    }

    pub fn with_policy(
        name: impl Into<String>,
        fallback: FallbackPolicy,
        records: Vec<SelectorRecord<P>>,
    ) -> Self {
        let table = Self {
            name: name.into(),
            fallback,
            records,
        };
        table.warn_unreachable_fallbacks();
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn records(&self) -> &[SelectorRecord<P>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index 0 is a catch-all, so every lookup returns it
    pub fn has_leading_fallback(&self) -> bool {
        self.records.first().is_some_and(SelectorRecord::is_unconditional)
    }

    /// Indexes of zero-requirement records that can never be selected
    pub fn unreachable_fallbacks(&self) -> Vec<usize> {
        if self.fallback == FallbackPolicy::AnyPosition {
            return Vec::new();
        }
        self.records
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, r)| r.is_unconditional())
            .map(|(i, _)| i)
            .collect()
    }

    fn warn_unreachable_fallbacks(&self) {
        for index in self.unreachable_fallbacks() {
            log::warn!(
                "selector table '{}': record {} has no requirements but is not at index 0; it will never match",
                self.name,
                index
            );
        }
    }

    /// Select the payload of the first fully-matching record
    ///
    /// A zero-requirement record at index 0 is returned without scanning.
    pub fn select<I: Inputs + ?Sized>(&self, inputs: &I) -> Result<&P, SelectError> {
        let first = self.records.first().ok_or_else(|| SelectError::Configuration {
            table: self.name.clone(),
            reason: "no data found".to_string(),
        })?;

        if first.is_unconditional() {
            log::debug!("selector table '{}': leading fallback selected", self.name);
            return Ok(&first.payload);
        }

        for (index, record) in self.records.iter().enumerate() {
            if record.is_unconditional() {
                match self.fallback {
                    FallbackPolicy::LeadingOnly => continue,
                    FallbackPolicy::AnyPosition => {
                        log::debug!(
                            "selector table '{}': fallback record {} selected",
                            self.name,
                            index
                        );
                        return Ok(&record.payload);
                    }
                }
            }
            if record.matches(inputs) {
                log::debug!("selector table '{}': record {} selected", self.name, index);
                return Ok(&record.payload);
            }
        }

        Err(SelectError::NoMatch {
            table: self.name.clone(),
            inputs: self.describe_inputs(inputs),
        })
    }

    /// Render every input the table consults, for error context
    fn describe_inputs<I: Inputs + ?Sized>(&self, inputs: &I) -> String {
        let hints: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.requirements.iter().map(|q| q.hint.as_str()))
            .collect();
        hints
            .into_iter()
            .map(|hint| match inputs.get(hint) {
                Some(value) => format!("{hint}={value}"),
                None => format!("{hint}=<missing>"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<P: DeserializeOwned> SelectorTable<P> {
    /// Parse a table from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SelectError> {
        let table: Self = serde_json::from_str(json).map_err(|e| SelectError::Configuration {
            table: "<json>".to_string(),
            reason: e.to_string(),
        })?;
        table.warn_unreachable_fallbacks();
        Ok(table)
    }

    /// Parse a table from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SelectError> {
        let table: Self = serde_yml::from_str(yaml).map_err(|e| SelectError::Configuration {
            table: "<yaml>".to_string(),
            reason: e.to_string(),
        })?;
        table.warn_unreachable_fallbacks();
        Ok(table)
    }
}

/// Selection errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("Configuration error in table '{table}': {reason}")]
    Configuration { table: String, reason: String },

    #[error("No record in table '{table}' matches inputs [{inputs}]")]
    NoMatch { table: String, inputs: String },
}
