use std::path::PathBuf;

/// Errors raised when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {rows}x{columns})")]
    InvalidDimensions { rows: usize, columns: usize },
}

/// Errors raised by the automated `Episode::step` path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EpisodeError {
    #[error("location {location} is outside the board (0..{cells})")]
    OutOfRangeLocation { location: usize, cells: usize },

    #[error("cell {0} is already occupied")]
    OccupiedCell(usize),

    #[error("episode is done; call reset before stepping again")]
    IllegalStateTransition,
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("agent selected illegal action {action} (legal: {legal:?})")]
    IllegalAction { action: usize, legal: Vec<usize> },

    #[error("episode error: {0}")]
    Episode(#[from] EpisodeError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
