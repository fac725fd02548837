//! Stage Taxonomy — progressive tiers and cycle-state flags

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Progressive award tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressiveTier {
    Mini,
    Minor,
    Major,
    Grand,
    /// Custom tier with numeric ID
    Custom(u32),
}

impl ProgressiveTier {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mini => "MINI",
            Self::Minor => "MINOR",
            Self::Major => "MAJOR",
            Self::Grand => "GRAND",
            Self::Custom(_) => "PROGRESSIVE",
        }
    }

    /// Get tier level (for sorting)
    pub fn level(&self) -> u32 {
        match self {
            Self::Mini => 1,
            Self::Minor => 2,
            Self::Major => 3,
            Self::Grand => 4,
            Self::Custom(n) => 5u32.saturating_add(*n),
        }
    }

    /// Look a tier up by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "MINI" => Some(Self::Mini),
            "MINOR" => Some(Self::Minor),
            "MAJOR" => Some(Self::Major),
            "GRAND" => Some(Self::Grand),
            _ => None,
        }
    }
}

impl fmt::Display for ProgressiveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(n) => write!(f, "PROGRESSIVE #{n}"),
            other => f.write_str(other.display_name()),
        }
    }
}

/// Bit flags describing where in a game round play currently sits
///
/// Flags combine with `|`; a condition over a combined mask is satisfied when
/// the device reports any one of the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleState(u32);

impl CycleState {
    /// Between games, waiting for play
    pub const IDLE: Self = Self(1 << 0);
    /// Reels in motion
    pub const PLAYING: Self = Self(1 << 1);
    /// Result being evaluated
    pub const EVALUATING: Self = Self(1 << 2);
    /// Feature triggered, entry not yet presented
    pub const FEATURE_PENDING: Self = Self(1 << 3);
    /// Inside a feature
    pub const IN_FEATURE: Self = Self(1 << 4);
    /// Progressive awarded, payout pending
    pub const PROGRESSIVE_PENDING: Self = Self(1 << 5);
    /// Feature just finished, returning to base game
    pub const FEATURE_COMPLETE: Self = Self(1 << 6);

    const NAMED: [(Self, &'static str); 7] = [
        (Self::IDLE, "IDLE"),
        (Self::PLAYING, "PLAYING"),
        (Self::EVALUATING, "EVALUATING"),
        (Self::FEATURE_PENDING, "FEATURE_PENDING"),
        (Self::IN_FEATURE, "IN_FEATURE"),
        (Self::PROGRESSIVE_PENDING, "PROGRESSIVE_PENDING"),
        (Self::FEATURE_COMPLETE, "FEATURE_COMPLETE"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// All bits of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// At least one bit is shared
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Look a single flag up by name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::NAMED
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(flag, _)| *flag)
    }

    /// Names of the set flags
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, n)| *n)
            .collect()
    }
}

impl BitOr for CycleState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CycleState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CycleState {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        f.write_str(&self.names().join(" | "))
    }
}
