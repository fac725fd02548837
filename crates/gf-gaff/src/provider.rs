//! Outcome provider — the device side decision makers constrain
//!
//! The provider owns the real strip layout and the RNG. Decision makers never
//! invent outcomes: they read the layout, filter it down to the legal stop
//! positions, let the device RNG choose among them, and pin the choice for
//! the next draw.

use serde::{Deserialize, Serialize};

use crate::error::GaffError;
use crate::filter::NameFilter;
use crate::strip::{ReelStrip, StripStop};

/// Inclusive bounds on how many matching symbols a strip window may show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolBounds {
    pub min: usize,
    pub max: usize,
}

impl SymbolBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn exactly(count: usize) -> Self {
        Self::new(count, count)
    }

    pub fn at_least(min: usize) -> Self {
        Self::new(min, usize::MAX)
    }

    /// Window shows none of the symbols
    pub fn none() -> Self {
        Self::exactly(0)
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// A legal stop whose window satisfies a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub strip: String,
    pub position: usize,
    /// Matching symbols visible at this stop
    pub matches: usize,
}

impl Candidate {
    pub fn stop(&self) -> StripStop {
        StripStop::new(self.strip.clone(), self.position)
    }
}

/// Device-side collaborator that produces RNG outcomes
pub trait OutcomeProvider {
    /// Every strip the device can spin, in device order
    fn strips(&self) -> &[ReelStrip];

    /// Visible rows per strip
    fn window_height(&self) -> usize;

    /// Position already pinned for the next draw on this strip
    fn pinned(&self, strip: &str) -> Option<usize>;

    /// Pin a strip stop for the next draw
    fn pin(&mut self, stop: StripStop) -> Result<(), GaffError>;

    /// Drop every pin placed for the next draw
    fn clear_pins(&mut self);

    /// Device RNG pick in `0..choices` (`choices` is never zero)
    fn choose(&mut self, choices: usize) -> usize;

    /// Legal stops on matching strips whose window satisfies the bounds
    ///
    /// A pinned strip only offers its pinned position.
    fn propose(
        &self,
        strips: &NameFilter,
        symbols: &NameFilter,
        bounds: SymbolBounds,
    ) -> Result<Vec<Candidate>, GaffError> {
        let decision = format!("propose {strips} / {symbols}");
        let height = self.window_height();
        let matching: Vec<&ReelStrip> =
            self.strips().iter().filter(|s| strips.matches(&s.name)).collect();
        if matching.is_empty() {
            return Err(GaffError::unsatisfiable(decision, "no strip matches the filter"));
        }

        let mut candidates = Vec::new();
        for strip in matching {
            for position in legal_positions(self, strip, symbols, bounds) {
                candidates.push(Candidate {
                    strip: strip.name.clone(),
                    position,
                    matches: strip.count_in_window(position, height, symbols),
                });
            }
        }

        if candidates.is_empty() {
            return Err(GaffError::unsatisfiable(
                decision,
                format!("no stop shows {}..={} matching symbols", bounds.min, bounds.max),
            ));
        }
        Ok(candidates)
    }
}

/// Stops on one strip whose window satisfies the bounds, honouring pins
pub fn legal_positions<P: OutcomeProvider + ?Sized>(
    provider: &P,
    strip: &ReelStrip,
    symbols: &NameFilter,
    bounds: SymbolBounds,
) -> Vec<usize> {
    let height = provider.window_height();
    match provider.pinned(&strip.name) {
        Some(position) => {
            if bounds.contains(strip.count_in_window(position, height, symbols)) {
                vec![position]
            } else {
                Vec::new()
            }
        }
        None => (0..strip.len())
            .filter(|&p| bounds.contains(strip.count_in_window(p, height, symbols)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeDevice;

    #[test]
    fn test_bounds() {
        assert!(SymbolBounds::exactly(1).contains(1));
        assert!(!SymbolBounds::exactly(1).contains(2));
        assert!(SymbolBounds::at_least(2).contains(40));
        assert!(SymbolBounds::none().contains(0));
    }

    #[test]
    fn test_propose_lists_legal_stops() {
        let device = FakeDevice::new(1, vec![ReelStrip::new("R1", "BG", ["A", "S", "B", "S"])]);
        let candidates = device
            .propose(
                &NameFilter::Any,
                &NameFilter::exact("S"),
                SymbolBounds::exactly(1),
            )
            .unwrap();
        let positions: Vec<usize> = candidates.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_propose_respects_pin() {
        let mut device =
            FakeDevice::new(1, vec![ReelStrip::new("R1", "BG", ["A", "S", "B", "S"])]);
        device.pin(StripStop::new("R1", 0)).unwrap();
        let err = device
            .propose(&NameFilter::Any, &NameFilter::exact("S"), SymbolBounds::exactly(1))
            .unwrap_err();
        assert!(matches!(err, GaffError::Unsatisfiable { .. }));
    }

    #[test]
    fn test_propose_unknown_strip() {
        let device = FakeDevice::new(1, vec![ReelStrip::new("R1", "BG", ["A"])]);
        let err = device
            .propose(&NameFilter::prefix("FG_"), &NameFilter::Any, SymbolBounds::at_least(0))
            .unwrap_err();
        assert!(err.to_string().contains("no strip matches"));
    }
}
