//! Stage — where in the overall flow of play the device currently is
//!
//! A stage is the coarse mode of play (base game, free games, bonus, ...).
//! A label narrows it to the specific screen or strip set the device reports,
//! e.g. `FreeGames` labelled `"FG_SET_A"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical stage of play reported by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStage {
    /// Normal paid games
    #[default]
    BaseGame,
    /// Free games feature
    FreeGames,
    /// Pick / wheel style bonus
    Bonus,
    /// Progressive award presentation
    Progressive,
}

impl GameStage {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BaseGame => "BASE GAME",
            Self::FreeGames => "FREE GAMES",
            Self::Bonus => "BONUS",
            Self::Progressive => "PROGRESSIVE",
        }
    }

    /// Whether this stage is a feature entered from the base game
    pub fn is_feature(&self) -> bool {
        !matches!(self, Self::BaseGame)
    }
}

impl fmt::Display for GameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error parsing a stage name
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown stage: {0}")]
pub struct UnknownStage(pub String);

impl FromStr for GameStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "base_game" | "base" => Ok(Self::BaseGame),
            "free_games" | "free" => Ok(Self::FreeGames),
            "bonus" => Ok(Self::Bonus),
            "progressive" => Ok(Self::Progressive),
            _ => Err(UnknownStage(s.to_string())),
        }
    }
}

/// A stage together with the label the device reported for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagePosition {
    pub stage: GameStage,
    #[serde(default)]
    pub label: String,
}

impl StagePosition {
    pub fn new(stage: GameStage, label: impl Into<String>) -> Self {
        Self {
            stage,
            label: label.into(),
        }
    }

    /// Base game with the conventional `"BASE"` label
    pub fn base() -> Self {
        Self::new(GameStage::BaseGame, "BASE")
    }

    /// True when the stage matches and, if given, the label matches exactly
    pub fn matches(&self, stage: GameStage, label: Option<&str>) -> bool {
        self.stage == stage && label.is_none_or(|l| self.label == l)
    }
}

impl Default for StagePosition {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for StagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.stage)
        } else {
            write!(f, "{} [{}]", self.stage, self.label)
        }
    }
}
