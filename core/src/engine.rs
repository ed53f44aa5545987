use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No reveal or flag accepted yet.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
    /// The toggle completed the board.
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Reveal/flag rules over one grid, including win and loss detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: Grid,
    mine_budget: CellCount,
    mines_laid: bool,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: EngineState,
    exploded: Option<Coord2>,
}

impl PlayEngine {
    /// An engine over a mine-free grid; mines arrive later through [`PlayEngine::lay_mines`].
    pub fn new(size: Coord2, mines: CellCount) -> Self {
        Self {
            grid: Grid::new(size),
            mine_budget: mines,
            mines_laid: false,
            revealed_count: 0,
            flagged_count: 0,
            state: EngineState::default(),
            exploded: None,
        }
    }

    /// An engine over a grid whose mines are already in place.
    pub fn with_layout(grid: Grid) -> Self {
        Self {
            mine_budget: grid.mine_count(),
            mines_laid: true,
            revealed_count: grid.revealed_count(),
            flagged_count: grid.flag_count(),
            grid,
            state: EngineState::default(),
            exploded: None,
        }
    }

    pub fn lay_mines<G: MineGenerator>(&mut self, generator: G) -> Result<CellCount> {
        self.check_not_finished()?;
        if self.mines_laid {
            log::warn!("Mines already laid, keeping the current layout");
            return Ok(self.grid.mine_count());
        }
        let placed = generator.lay_mines(&mut self.grid)?;
        if placed != self.mine_budget {
            log::warn!(
                "Laid mine count mismatch, actual: {}, requested: {}",
                placed,
                self.mine_budget
            );
        }
        self.mines_laid = true;
        Ok(placed)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_laid(&self) -> bool {
        self.mines_laid
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_budget
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flagged_count
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.mine_budget.saturating_sub(self.flagged_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords).copied()
    }

    /// The mine that ended the game, if it was lost.
    pub fn exploded_at(&self) -> Option<Coord2> {
        self.exploded
    }

    /// Whether a reveal at `coords` would change anything.
    pub fn can_reveal(&self, coords: Coord2) -> Result<bool> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;
        Ok(self.grid[coords].is_hidden())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.grid[coords].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }
        if !self.mines_laid {
            return Err(GameError::NotInitialized);
        }

        self.mark_started();
        if self.grid[coords].is_mine() {
            self.explode(coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(coords);
        Ok(if self.evaluate_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        let outcome = match self.grid[coords].state {
            CellState::Revealed => return Ok(FlagOutcome::NoChange),
            CellState::Flagged => {
                self.grid[coords].state = CellState::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Removed
            }
            CellState::Hidden if self.flagged_count >= self.mine_budget => {
                log::debug!("Flag at {:?} rejected, all {} flags used", coords, self.mine_budget);
                return Err(GameError::NoFlagsLeft);
            }
            CellState::Hidden => {
                self.grid[coords].state = CellState::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Placed
            }
        };
        self.mark_started();

        Ok(if self.evaluate_win() {
            FlagOutcome::Won
        } else {
            outcome
        })
    }

    /// Opens `origin` and, through zero-count cells, everything reachable from it.
    /// Returns how many cells were opened.
    fn flood_reveal(&mut self, origin: Coord2) -> CellCount {
        let mut opened = 0;
        let mut visited = HashSet::from([origin]);
        let mut to_visit = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.grid[coords];
            // flagged or already open cells bound the flood
            if !cell.is_hidden() {
                log::trace!("Skipping cell at {:?}", coords);
                continue;
            }
            cell.state = CellState::Revealed;
            let adjacent = cell.adjacent;
            opened += 1;
            log::trace!("Opened cell at {:?}, mine count: {}", coords, adjacent);

            if adjacent == 0 {
                for neighbor in self.grid.iter_neighbors(coords) {
                    if self.grid[neighbor].is_hidden() && visited.insert(neighbor) {
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }

        self.revealed_count += opened;
        log::debug!("Reveal at {:?} opened {} cells", origin, opened);
        opened
    }

    /// Shows every mine and marks the clicked one as exploded.
    fn explode(&mut self, coords: Coord2) {
        for pos in self.grid.positions() {
            let cell = &mut self.grid[pos];
            if cell.mine {
                cell.state = CellState::Revealed;
            }
        }
        self.grid[coords].exploded = true;
        self.exploded = Some(coords);
        self.end_game(false);
    }

    /// Checks both win conditions and ends the game when one holds.
    fn evaluate_win(&mut self) -> bool {
        if !self.mines_laid {
            return false;
        }

        let all_mines_flagged = self.grid.all_mines_flagged();
        let all_safe_revealed =
            self.revealed_count == self.grid.total_cells() - self.grid.mine_count();
        if !(all_mines_flagged || all_safe_revealed) {
            return false;
        }

        if !all_mines_flagged {
            for pos in self.grid.positions() {
                let cell = &mut self.grid[pos];
                if cell.mine && cell.is_hidden() {
                    cell.state = CellState::Flagged;
                }
            }
            self.flagged_count = self.grid.mine_count();
        }
        self.end_game(true);
        true
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("Game started");
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }
        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("Game ended, state: {:?}", self.state);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
