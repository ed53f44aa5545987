use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBoard {
    pub rows: u32,
    pub cols: u32,
    pub mines: u32,
}

/// Player preferences: which board to play and whether taps start in flag mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyKey,
    pub flag_mode: bool,
    pub custom: Option<CustomBoard>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyKey::Easy,
            flag_mode: false,
            custom: None,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "demineur:settings";
}

impl Settings {
    /// Parses and validates, so a bad custom board is refused here rather than mid-game.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(source)?;
        settings.difficulty()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> core::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Resolves the selected difficulty.
    pub fn difficulty(&self) -> ConfigResult<Difficulty> {
        match self.difficulty.preset() {
            Some(preset) => Ok(preset),
            None => {
                let board = self.custom.ok_or(ConfigError::MissingCustom)?;
                Difficulty::custom(board.rows, board.cols, board.mines)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.difficulty().unwrap(), Difficulty::EASY);
    }

    #[test]
    fn preset_by_name() {
        let settings = Settings::from_toml_str("difficulty = \"oneshot\"\nflag_mode = true").unwrap();

        assert!(settings.flag_mode);
        assert_eq!(settings.difficulty().unwrap(), Difficulty::ONE_SHOT);
    }

    #[test]
    fn custom_board_is_validated() {
        let source = r#"
            difficulty = "custom"

            [custom]
            rows = 12
            cols = 20
            mines = 40
        "#;
        let difficulty = Settings::from_toml_str(source).unwrap().difficulty().unwrap();
        assert_eq!(difficulty.size(), (12, 20));
        assert_eq!(difficulty.mines(), 40);

        let overfull = r#"
            difficulty = "custom"

            [custom]
            rows = 4
            cols = 4
            mines = 8
        "#;
        assert!(matches!(
            Settings::from_toml_str(overfull),
            Err(ConfigError::TooManyMines { mines: 8, max: 7 })
        ));
    }

    #[test]
    fn custom_without_board_is_rejected() {
        assert!(matches!(
            Settings::from_toml_str("difficulty = \"custom\""),
            Err(ConfigError::MissingCustom)
        ));
    }

    #[test]
    fn unknown_difficulty_is_a_parse_error() {
        assert!(matches!(
            Settings::from_toml_str("difficulty = \"expert\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let settings = Settings {
            difficulty: DifficultyKey::Hard,
            flag_mode: true,
            custom: None,
        };
        let source = settings.to_toml_string().unwrap();

        assert_eq!(Settings::from_toml_str(&source).unwrap(), settings);
    }
}
