//! Engine configuration (~/.config/Recall/config.toml)
//!
//! Handles loading, saving, and providing defaults for game variants.
//! Settings are stored in TOML format in the platform-specific config
//! directory; every field has a default so partial files are fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::planner::PlannerConfig;
use crate::scoring::ScoringConfig;
use crate::token::Alphabet;

const CONFIG_FILE: &str = "config.toml";

/// Complete variant configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Board layout
    #[serde(default)]
    pub game: GameConfig,
    /// Difficulty curve
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Scoring and progression rules
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Board layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct tokens (default: 4, range: 2-16)
    #[serde(default = "default_alphabet_size")]
    pub alphabet_size: u8,
    /// Length of correct/wrong feedback cues (default: 150ms)
    #[serde(default = "default_feedback_pulse_ms")]
    pub feedback_pulse_ms: u32,
}

fn default_alphabet_size() -> u8 {
    4
}
fn default_feedback_pulse_ms() -> u32 {
    150
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            alphabet_size: default_alphabet_size(),
            feedback_pulse_ms: default_feedback_pulse_ms(),
        }
    }
}

impl EngineConfig {
    /// Check that the variant can be played
    ///
    /// Length caps and timing floors are clamped by the planner instead of
    /// being rejected here.
    pub fn validate(&self) -> Result<Alphabet, ConfigError> {
        let alphabet = Alphabet::new(self.game.alphabet_size)?;
        if self.scoring.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.planner.base_speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        Ok(alphabet)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Recall\config`
/// On macOS: `~/Library/Application Support/io.recall.Recall`
/// On Linux: `~/.config/Recall`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.recall", "", "Recall")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of `config.toml`
pub fn default_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the default location.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> EngineConfig {
    let Some(path) = default_path() else {
        return EngineConfig::default();
    };
    if !path.exists() {
        return EngineConfig::default();
    }
    load_from(&path).unwrap_or_else(|e| {
        tracing::warn!("{e}; using defaults");
        EngineConfig::default()
    })
}

/// Loads and validates the configuration at `path`.
pub fn load_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Saves the configuration to `path`, creating parent directories.
pub fn save_to(path: &Path, config: &EngineConfig) -> Result<(), ConfigError> {
    let content = config.to_toml()?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)
}

/// Saves the configuration to the default location.
pub fn save(config: &EngineConfig) -> Result<PathBuf, ConfigError> {
    let path = default_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(&path, config)?;
    Ok(path)
}
