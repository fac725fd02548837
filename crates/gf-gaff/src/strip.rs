//! Reel strips as the device actually lays them out

use serde::{Deserialize, Serialize};

use crate::filter::NameFilter;

/// An ordered strip of symbol names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Strip identifier (e.g. "BG_R1")
    pub name: String,
    /// Strip set the strip belongs to (e.g. "BG", "FG_A")
    #[serde(default)]
    pub set: String,
    /// Symbol names in stop order
    pub symbols: Vec<String>,
}

impl ReelStrip {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        set: impl Into<String>,
        symbols: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            set: set.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Option<&str> {
        if self.symbols.is_empty() {
            return None;
        }
        Some(self.symbols[position % self.symbols.len()].as_str())
    }

    /// Visible window when the strip stops at `position` (top to bottom)
    pub fn window(&self, position: usize, height: usize) -> Vec<&str> {
        (0..height)
            .filter_map(|row| self.symbol_at(position + row))
            .collect()
    }

    /// How many window symbols match the filter
    pub fn count_in_window(&self, position: usize, height: usize, symbols: &NameFilter) -> usize {
        self.window(position, height)
            .into_iter()
            .filter(|s| symbols.matches(s))
            .count()
    }

    /// Does the strip carry any matching symbol at all?
    pub fn carries(&self, symbols: &NameFilter) -> bool {
        self.symbols.iter().any(|s| symbols.matches(s))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A stop position on a named strip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StripStop {
    pub strip: String,
    pub position: usize,
}

impl StripStop {
    pub fn new(strip: impl Into<String>, position: usize) -> Self {
        Self {
            strip: strip.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_wraps() {
        let strip = ReelStrip::new("BG_R1", "BG", ["A", "B", "C", "D"]);
        assert_eq!(strip.window(0, 3), vec!["A", "B", "C"]);
        assert_eq!(strip.window(3, 3), vec!["D", "A", "B"]);
        assert_eq!(strip.symbol_at(9), Some("B"));
    }

    #[test]
    fn test_count_in_window() {
        let strip = ReelStrip::new("BG_R1", "BG", ["SCATTER", "A", "SCATTER", "B"]);
        let scatter = NameFilter::exact("SCATTER");
        assert_eq!(strip.count_in_window(0, 3, &scatter), 2);
        assert_eq!(strip.count_in_window(1, 3, &scatter), 1);
        assert_eq!(strip.count_in_window(3, 1, &scatter), 0);
        assert!(strip.carries(&scatter));
        assert!(!strip.carries(&NameFilter::exact("WILD")));
    }

    #[test]
    fn test_empty_strip() {
        let strip = ReelStrip::new("X", "", Vec::<String>::new());
        assert!(strip.is_empty());
        assert_eq!(strip.symbol_at(0), None);
        assert!(strip.window(0, 3).is_empty());
    }
}
