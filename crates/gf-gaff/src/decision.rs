//! Decision makers — constrain the next draw to a scripted outcome
//!
//! Each variant filters the device's real strip layout down to legal stops
//! and either pins them for the next draw or just reports them.
//!
//! ## Variants
//!
//! - `SelectSymbols`: land symbols on exactly `count` matching strips, pin
//!   the rest clear of them
//! - `StripFinder`: locate stops showing at least `count` symbols, pin nothing
//! - `MultiStripFinder`: `SelectSymbols` applied per strip set, with a
//!   strategy for choosing among the sets

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GaffError;
use crate::filter::NameFilter;
use crate::provider::{OutcomeProvider, SymbolBounds, legal_positions};
use crate::strip::StripStop;

fn default_min() -> usize {
    1
}

fn default_max() -> usize {
    1
}

/// How `MultiStripFinder` picks among strip sets that can realize the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Device RNG picks one feasible set
    #[default]
    AnyOne,
    /// Every matching set must be realized
    All,
}

/// Strategy for constraining the next RNG draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionMaker {
    /// Land matching symbols on exactly `count` of the matching strips, each
    /// window showing `min..=max` of them; every other matching strip is
    /// pinned clear of the symbols.
    SelectSymbols {
        strips: NameFilter,
        symbols: NameFilter,
        count: usize,
        #[serde(default = "default_min")]
        min: usize,
        #[serde(default = "default_max")]
        max: usize,
    },
    /// Locate stops on matching strips showing at least `count` matching
    /// symbols, without pinning anything.
    StripFinder {
        strips: NameFilter,
        symbols: NameFilter,
        count: usize,
    },
    /// `SelectSymbols` over each strip set holding matching strips.
    MultiStripFinder {
        strips: NameFilter,
        symbols: NameFilter,
        count: usize,
        #[serde(default = "default_min")]
        min: usize,
        #[serde(default = "default_max")]
        max: usize,
        #[serde(default)]
        strategy: SelectionStrategy,
    },
}

/// What a decision maker did
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decision {
    pub maker: String,
    /// Stops pinned for the next draw
    #[serde(default)]
    pub pinned: Vec<StripStop>,
    /// Stops located without pinning
    #[serde(default)]
    pub found: Vec<StripStop>,
}

impl DecisionMaker {
    pub fn select_symbols(strips: NameFilter, symbols: NameFilter, count: usize) -> Self {
        Self::SelectSymbols {
            strips,
            symbols,
            count,
            min: 1,
            max: 1,
        }
    }

    pub fn strip_finder(strips: NameFilter, symbols: NameFilter, count: usize) -> Self {
        Self::StripFinder {
            strips,
            symbols,
            count,
        }
    }

    pub fn multi_strip_finder(
        strips: NameFilter,
        symbols: NameFilter,
        count: usize,
        strategy: SelectionStrategy,
    ) -> Self {
        Self::MultiStripFinder {
            strips,
            symbols,
            count,
            min: 1,
            max: 1,
            strategy,
        }
    }

    /// Reject parameter combinations no layout could satisfy
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::SelectSymbols { min, max, .. } | Self::MultiStripFinder { min, max, .. } => {
                if min > max {
                    return Err(format!("{self}: min {min} exceeds max {max}"));
                }
                if *min == 0 {
                    return Err(format!("{self}: min must be at least 1"));
                }
                Ok(())
            }
            Self::StripFinder { count, .. } => {
                if *count == 0 {
                    return Err(format!("{self}: count must be at least 1"));
                }
                Ok(())
            }
        }
    }

    /// Apply against the provider
    pub fn apply<P: OutcomeProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> Result<Decision, GaffError> {
        let label = self.to_string();
        let mut decision = Decision {
            maker: label.clone(),
            ..Default::default()
        };

        match self {
            Self::SelectSymbols {
                strips,
                symbols,
                count,
                min,
                max,
            } => {
                let names: Vec<String> = provider
                    .strips()
                    .iter()
                    .filter(|s| strips.matches(&s.name))
                    .map(|s| s.name.clone())
                    .collect();
                if names.is_empty() {
                    return Err(GaffError::unsatisfiable(label, "no strip matches the filter"));
                }
                let plan = plan_placement(
                    provider,
                    &names,
                    symbols,
                    *count,
                    SymbolBounds::new(*min, *max),
                )
                .map_err(|reason| GaffError::unsatisfiable(&label, reason))?;
                pin_all(provider, &plan, &mut decision)?;
            }
            Self::StripFinder {
                strips,
                symbols,
                count,
            } => {
                let candidates = provider
                    .propose(strips, symbols, SymbolBounds::at_least(*count))
                    .map_err(|e| match e {
                        GaffError::Unsatisfiable { reason, .. } => {
                            GaffError::unsatisfiable(&label, reason)
                        }
                        other => other,
                    })?;
                decision.found = candidates.iter().map(|c| c.stop()).collect();
            }
            Self::MultiStripFinder {
                strips,
                symbols,
                count,
                min,
                max,
                strategy,
            } => {
                let mut sets: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for strip in provider.strips().iter().filter(|s| strips.matches(&s.name)) {
                    sets.entry(strip.set.clone())
                        .or_default()
                        .push(strip.name.clone());
                }
                if sets.is_empty() {
                    return Err(GaffError::unsatisfiable(label, "no strip matches the filter"));
                }

                let bounds = SymbolBounds::new(*min, *max);
                let mut feasible = Vec::new();
                for (set, names) in &sets {
                    match plan_placement(provider, names, symbols, *count, bounds) {
                        Ok(plan) => feasible.push(plan),
                        Err(reason) => {
                            if *strategy == SelectionStrategy::All {
                                return Err(GaffError::unsatisfiable(
                                    label,
                                    format!("strip set '{set}': {reason}"),
                                ));
                            }
                            log::debug!("{label}: strip set '{set}' rejected: {reason}");
                        }
                    }
                }

                match strategy {
                    SelectionStrategy::All => {
                        for plan in &feasible {
                            pin_all(provider, plan, &mut decision)?;
                        }
                    }
                    SelectionStrategy::AnyOne => {
                        if feasible.is_empty() {
                            return Err(GaffError::unsatisfiable(
                                label,
                                "no strip set can realize the layout",
                            ));
                        }
                        let pick = provider.choose(feasible.len());
                        pin_all(provider, &feasible[pick], &mut decision)?;
                    }
                }
            }
        }

        log::debug!(
            "{}: pinned {} stop(s), found {}",
            decision.maker,
            decision.pinned.len(),
            decision.found.len()
        );
        Ok(decision)
    }
}

fn pin_all<P: OutcomeProvider + ?Sized>(
    provider: &mut P,
    plan: &[StripStop],
    decision: &mut Decision,
) -> Result<(), GaffError> {
    for stop in plan {
        provider.pin(stop.clone())?;
        decision.pinned.push(stop.clone());
    }
    Ok(())
}

/// Choose stops so exactly `count` of `names` show `bounds` matching symbols
/// and the rest show none. Strips already pinned keep their position and are
/// not re-pinned.
fn plan_placement<P: OutcomeProvider + ?Sized>(
    provider: &mut P,
    names: &[String],
    symbols: &NameFilter,
    count: usize,
    bounds: SymbolBounds,
) -> Result<Vec<StripStop>, String> {
    let height = provider.window_height();
    let mut locked_hits = 0usize;
    // (name, hit positions, clear positions) for unpinned strips
    let mut free: Vec<(String, Vec<usize>, Vec<usize>)> = Vec::new();

    for name in names {
        let Some(strip) = provider.strips().iter().find(|s| &s.name == name) else {
            return Err(format!("strip '{name}' not found"));
        };
        match provider.pinned(name) {
            Some(position) => {
                let shown = strip.count_in_window(position, height, symbols);
                if bounds.contains(shown) {
                    locked_hits += 1;
                } else if shown != 0 {
                    return Err(format!(
                        "strip '{name}' is pinned at {position} showing {shown} matching symbols"
                    ));
                }
            }
            None => {
                let hits = legal_positions(provider, strip, symbols, bounds);
                let clears = legal_positions(provider, strip, symbols, SymbolBounds::none());
                free.push((name.clone(), hits, clears));
            }
        }
    }

    if locked_hits > count {
        return Err(format!(
            "{locked_hits} pinned strips already show the symbols, more than {count}"
        ));
    }
    let need = count - locked_hits;

    let mut forced = Vec::new();
    let mut optional = Vec::new();
    for (index, (name, hits, clears)) in free.iter().enumerate() {
        match (hits.is_empty(), clears.is_empty()) {
            (true, true) => {
                return Err(format!("strip '{name}' has no legal stop for the layout"));
            }
            (false, true) => forced.push(index),
            (false, false) => optional.push(index),
            (true, false) => {}
        }
    }

    if forced.len() > need {
        return Err(format!(
            "{} strips cannot avoid the symbols but only {need} may show them",
            forced.len()
        ));
    }
    if forced.len() + optional.len() < need {
        return Err(format!(
            "only {} strips can show the symbols, {need} required",
            forced.len() + optional.len()
        ));
    }

    let mut chosen = forced;
    while chosen.len() < need {
        let pick = provider.choose(optional.len());
        chosen.push(optional.remove(pick));
    }

    let mut plan = Vec::with_capacity(free.len());
    for (index, (name, hits, clears)) in free.iter().enumerate() {
        let options = if chosen.contains(&index) { hits } else { clears };
        let position = options[provider.choose(options.len())];
        plan.push(StripStop::new(name.clone(), position));
    }
    Ok(plan)
}

impl fmt::Display for DecisionMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectSymbols {
                strips,
                symbols,
                count,
                min,
                max,
            } => write!(
                f,
                "SelectSymbols({symbols} x{count} on {strips}, {min}..={max} per strip)"
            ),
            Self::StripFinder {
                strips,
                symbols,
                count,
            } => write!(f, "StripFinder({symbols} x{count} on {strips})"),
            Self::MultiStripFinder {
                strips,
                symbols,
                count,
                strategy,
                ..
            } => write!(
                f,
                "MultiStripFinder({symbols} x{count} per set on {strips}, {strategy:?})"
            ),
        }
    }
}
