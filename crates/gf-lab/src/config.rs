//! Lab configuration — shape of the simulated device

use std::path::Path;

use gf_gaff::presets;
use gf_stage::ProgressiveTier;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid lab config: {0}")]
    Invalid(String),
}

/// A progressive tier, the symbol whose full line pays it, and its meter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveSymbol {
    pub tier: ProgressiveTier,
    pub symbol: String,
    /// Award amount in credits
    pub amount: u64,
}

impl ProgressiveSymbol {
    pub fn new(tier: ProgressiveTier, amount: u64) -> Self {
        Self {
            tier,
            symbol: presets::progressive_symbol(tier),
            amount,
        }
    }
}

/// Complete simulated device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// RNG seed; strips and outcomes are reproducible per seed
    pub seed: u64,
    /// Strips per strip set
    pub reels: usize,
    /// Visible rows per strip
    pub window_height: usize,
    /// Stops per strip
    pub strip_length: usize,
    /// Base-game strip set name
    pub base_set: String,
    /// Free-games strip sets; one is picked per trigger
    pub feature_sets: Vec<String>,
    pub scatter_symbol: String,
    pub wild_symbol: String,
    /// Scatters needed to trigger (or retrigger) free games
    pub trigger_scatters: usize,
    pub free_games_awarded: u32,
    /// Credits paid per free game
    pub free_game_prize: u64,
    pub progressives: Vec<ProgressiveSymbol>,
    /// Credits wagered per base game
    pub game_cost: u64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reels: 5,
            window_height: 3,
            strip_length: 30,
            base_set: "BG".into(),
            feature_sets: vec!["FG_A".into(), "FG_B".into()],
            scatter_symbol: presets::SCATTER.into(),
            wild_symbol: "WILD".into(),
            trigger_scatters: presets::TRIGGER_SCATTERS,
            free_games_awarded: 8,
            free_game_prize: 50,
            progressives: vec![
                ProgressiveSymbol::new(ProgressiveTier::Grand, 1_000_000),
                ProgressiveSymbol::new(ProgressiveTier::Major, 100_000),
                ProgressiveSymbol::new(ProgressiveTier::Minor, 10_000),
                ProgressiveSymbol::new(ProgressiveTier::Mini, 1_000),
            ],
            game_cost: 100,
        }
    }
}

impl LabConfig {
    /// Default device with another seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Special symbols placed on every base-game strip
    pub fn base_specials(&self) -> Vec<String> {
        let mut specials = vec![self.scatter_symbol.clone(), self.wild_symbol.clone()];
        specials.extend(self.progressives.iter().map(|p| p.symbol.clone()));
        specials
    }

    /// Special symbols placed on every free-games strip
    pub fn feature_specials(&self) -> Vec<String> {
        vec![self.scatter_symbol.clone(), self.wild_symbol.clone()]
    }

    pub fn validate(&self) -> Result<(), LabError> {
        if self.reels == 0 || self.window_height == 0 {
            return Err(LabError::Invalid("reels and window_height must be non-zero".into()));
        }
        if self.trigger_scatters == 0 || self.trigger_scatters > self.reels {
            return Err(LabError::Invalid(format!(
                "trigger_scatters must be in 1..={}",
                self.reels
            )));
        }
        if self.feature_sets.is_empty() {
            return Err(LabError::Invalid("at least one feature set is required".into()));
        }
        if self.feature_sets.iter().any(|s| *s == self.base_set) {
            return Err(LabError::Invalid(format!(
                "feature set '{}' reuses the base set name",
                self.base_set
            )));
        }
        // Specials must sit at least a window apart
        let specials = self.base_specials().len().max(self.feature_specials().len());
        if self.strip_length / specials < self.window_height {
            return Err(LabError::Invalid(format!(
                "strip_length {} too short for {specials} special symbols with window height {}",
                self.strip_length, self.window_height
            )));
        }
        Ok(())
    }

    /// Load from `.json`, `.yaml` or `.yml`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)?,
            Some("yaml") | Some("yml") => serde_yml::from_str(&text)?,
            _ => return Err(LabError::UnsupportedFormat(path.display().to_string())),
        };
        config.validate()?;
        Ok(config)
    }
}
