use std::path::Path;

use crate::error::ConfigError;
use crate::game::Board;
use crate::training::episode::EpisodeConfig;
use crate::training::replay_buffer::{BatchPolicy, ReplayConfig};
use crate::training::trainer::TrainerConfig;

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 8,
            columns: 8,
        }
    }
}

impl BoardConfig {
    /// Cell count, `None` for dimensions no board can have.
    pub fn size(&self) -> Option<usize> {
        Board::cell_count(self.rows, self.columns)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub episode: EpisodeConfig,
    pub replay: ReplayConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.size().is_none() {
            return Err(ConfigError::Validation(format!(
                "board dimensions must be > 0 and their product must fit in memory (got {}x{})",
                self.board.rows, self.board.columns
            )));
        }
        if !self.episode.win_reward.is_finite() || self.episode.win_reward <= 0.0 {
            return Err(ConfigError::Validation(
                "episode.win_reward must be a finite value > 0".into(),
            ));
        }
        if self.replay.capacity == Some(0) {
            return Err(ConfigError::Validation(
                "replay.capacity must be >= 1".into(),
            ));
        }
        if self.replay.policy == BatchPolicy::Sampled && self.replay.batch_size == 0 {
            return Err(ConfigError::Validation(
                "replay.batch_size must be > 0 with the sampled policy".into(),
            ));
        }

        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.eval_interval > 0 && self.training.eval_games == 0 {
            return Err(ConfigError::Validation(
                "training.eval_games must be > 0 when evaluation is enabled".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
