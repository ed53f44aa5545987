use thiserror::Error;

use crate::{CellCount, Coord};

/// Rejections of player intents. None of them leave the board half-modified.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines for the eligible cells")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No flags left, remove one before placing another")]
    NoFlagsLeft,
    #[error("Board is not initialized yet")]
    NotInitialized,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Problems detected while building a difficulty or loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board is larger than {max}x{max}")]
    BoardTooLarge { max: Coord },
    #[error("{mines} mines requested but at most {max} fit outside the first-click safe zone")]
    TooManyMines { mines: u32, max: CellCount },
    #[error("Unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("Custom difficulty selected without a [custom] section")]
    MissingCustom,
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = core::result::Result<T, ConfigError>;
