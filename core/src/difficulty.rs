use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells in the 3x3 neighborhood kept mine-free around the first click.
pub const SAFE_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyKey {
    Easy,
    Medium,
    Hard,
    #[serde(rename = "oneshot")]
    OneShot,
    Custom,
}

impl DifficultyKey {
    pub const PRESETS: [DifficultyKey; 4] = [
        DifficultyKey::Easy,
        DifficultyKey::Medium,
        DifficultyKey::Hard,
        DifficultyKey::OneShot,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::OneShot => "oneshot",
            Self::Custom => "custom",
        }
    }

    /// Human readable label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::OneShot => "One Shot",
            Self::Custom => "Custom",
        }
    }

    /// The preset for this key, `None` for custom boards.
    pub fn preset(self) -> Option<Difficulty> {
        match self {
            Self::Easy => Some(Difficulty::EASY),
            Self::Medium => Some(Difficulty::MEDIUM),
            Self::Hard => Some(Difficulty::HARD),
            Self::OneShot => Some(Difficulty::ONE_SHOT),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "oneshot" | "one-shot" | "one_shot" => Ok(Self::OneShot),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownDifficulty(s.to_owned())),
        }
    }
}

/// How mines get onto the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Laid on the first reveal, keeping the clicked cell and its neighbors clear.
    SafeFirstClick,
    /// Laid at initialization, every cell but one is a mine.
    OneShot,
}

/// Board shape and mine count of a game. Only constructible through validated paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Difficulty {
    key: DifficultyKey,
    rows: Coord,
    cols: Coord,
    mines: CellCount,
    mode: LayoutMode,
}

impl Difficulty {
    pub const EASY: Self = Self::preset(DifficultyKey::Easy, 9, 9, 10);
    pub const MEDIUM: Self = Self::preset(DifficultyKey::Medium, 16, 16, 40);
    pub const HARD: Self = Self::preset(DifficultyKey::Hard, 16, 30, 99);
    pub const ONE_SHOT: Self = Self {
        key: DifficultyKey::OneShot,
        rows: 5,
        cols: 5,
        mines: mult(5, 5) - 1,
        mode: LayoutMode::OneShot,
    };

    const fn preset(key: DifficultyKey, rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            key,
            rows,
            cols,
            mines,
            mode: LayoutMode::SafeFirstClick,
        }
    }

    /// A user-defined board, rejected when the safe zone cannot be honored.
    pub fn custom(rows: u32, cols: u32, mines: u32) -> ConfigResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigError::BoardTooLarge { max: Coord::MAX });
        };
        let max = max_mines(rows, cols);
        if mines > u32::from(max) {
            return Err(ConfigError::TooManyMines { mines, max });
        }
        Ok(Self {
            key: DifficultyKey::Custom,
            rows,
            cols,
            // bounded by `max` above
            mines: mines as CellCount,
            mode: LayoutMode::SafeFirstClick,
        })
    }

    /// A one-shot board of arbitrary shape: a single safe cell, mines everywhere else.
    pub fn one_shot(rows: Coord, cols: Coord) -> ConfigResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        Ok(Self {
            mines: mult(rows, cols) - 1,
            rows,
            cols,
            ..Self::ONE_SHOT
        })
    }

    pub fn from_key(key: DifficultyKey) -> Option<Self> {
        key.preset()
    }

    pub const fn key(&self) -> DifficultyKey {
        self.key
    }

    pub const fn name(&self) -> &'static str {
        self.key.name()
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::EASY
    }
}

/// Largest mine count that still leaves room for a full 3x3 safe zone.
pub const fn max_mines(rows: Coord, cols: Coord) -> CellCount {
    mult(rows, cols).saturating_sub(SAFE_ZONE_CELLS)
}
