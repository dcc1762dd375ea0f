//! Engine configuration, read from a TOML file.
//!
//! ```toml
//! [rules]
//! seed = 1234
//!
//! [cleanup]
//! run_before_save = true
//!
//! [world]
//! default_grid_size = 16
//! ```
//!
//! Every section and key is optional.

use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilecraft_core::DEFAULT_GRID_SIZE;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub rules: RuleSettings,
    #[serde(default)]
    pub cleanup: CleanupSettings,
    #[serde(default)]
    pub world: WorldSettings,
}

/// Rule engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Seed for rules with `chance < 1`. Unset draws from OS entropy, so
    /// repeated passes may differ.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RuleSettings {
    /// Random generator for a rule pass
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

/// Cleanup pass settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupSettings {
    /// Run the cleanup pass before every save
    #[serde(default = "default_true")]
    pub run_before_save: bool,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            run_before_save: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Defaults for new worlds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSettings {
    #[serde(default = "default_grid_size")]
    pub default_grid_size: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            default_grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

impl EngineSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SettingsError> {
        let settings: EngineSettings = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.world.default_grid_size == 0 {
            return Err(SettingsError::Invalid(
                "world.default_grid_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
