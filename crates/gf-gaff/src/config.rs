//! Gaff configuration — runner policy and user-defined sequences
//!
//! Loaded from `.json`, `.yaml` or `.yml`:
//!
//! ```yaml
//! runner:
//!   max_wait_games: 500
//! include_presets: true
//! sequences:
//!   - name: my_trigger
//!     steps:
//!       - name: land scatters
//!         decision_makers:
//!           - type: select_symbols
//!             strips: { type: prefix, prefix: BG_ }
//!             symbols: { type: exact, name: SCATTER }
//!             count: 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::registry::GaffSequences;
use crate::sequence::GaffSequence;

/// Maximum accepted config file size (4MB)
const MAX_CONFIG_FILE_SIZE: u64 = 4 * 1024 * 1024;

fn default_max_wait() -> Option<u64> {
    Some(1000)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Cancellation policy for steps stuck waiting on their conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Fail a step after waiting this many games; `None` waits forever
    #[serde(default = "default_max_wait")]
    pub max_wait_games: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_wait_games: default_max_wait(),
        }
    }
}

impl RunnerConfig {
    /// Never time out
    pub fn unbounded() -> Self {
        Self {
            max_wait_games: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaffConfig {
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub sequences: Vec<GaffSequence>,
    /// Register the built-in presets ahead of `sequences`
    #[serde(default = "default_true")]
    pub include_presets: bool,
}

impl Default for GaffConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            sequences: Vec::new(),
            include_presets: true,
        }
    }
}

impl GaffConfig {
    /// Load from file, picking the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "Config file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        log::info!(
            "Loaded gaff config from {} ({} sequences)",
            path.display(),
            config.sequences.len()
        );
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.max_wait_games == Some(0) {
            return Err(ConfigError::Invalid(
                "runner.max_wait_games must be at least 1".to_string(),
            ));
        }
        for sequence in &self.sequences {
            sequence.validate().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    /// Registry of presets (when enabled) followed by the configured sequences
    pub fn registry(&self) -> GaffSequences {
        if self.include_presets {
            GaffSequences::with_presets_and(self.sequences.iter().cloned())
        } else {
            GaffSequences::new(self.sequences.iter().cloned())
        }
    }
}
