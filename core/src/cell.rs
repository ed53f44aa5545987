use serde::{Deserialize, Serialize};

/// Player-visible state of a cell. Revealed is final; flags only live on hidden cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent: u8,
    pub(crate) state: CellState,
    pub(crate) exploded: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    /// Number of mines around this cell, meaningless for mines.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent
    }

    /// The mine the player clicked on to lose.
    pub const fn is_exploded(self) -> bool {
        self.exploded
    }

    pub const fn state(self) -> CellState {
        self.state
    }
}
