use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The rectangular cell matrix of one game, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// A mine-free, fully hidden grid.
    pub fn new((rows, cols): Coord2) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: Array2::default((rows, cols).to_nd_index()),
        }
    }

    /// Builds a laid-out grid from explicit mine positions, adjacency included.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].mine = true;
        }
        grid.recount_adjacent();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // built from `Coord` dimensions in `new`
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_where(Cell::is_flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(Cell::is_revealed)
    }

    fn count_where(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&&cell| pred(cell)).count();
        // a grid never holds more than `Coord::MAX`² cells
        count as CellCount
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count();
        // at most 8 neighbors
        count as u8
    }

    /// Recomputes `adjacent_mines` for every non-mine cell.
    pub(crate) fn recount_adjacent(&mut self) {
        for coords in self.positions() {
            let adjacent = if self[coords].mine {
                0
            } else {
                self.count_adjacent_mines(coords)
            };
            self[coords].adjacent = adjacent;
        }
    }

    /// Whether every mine is flagged and no safe cell carries a flag.
    pub fn all_mines_flagged(&self) -> bool {
        self.cells.iter().all(|cell| cell.mine == cell.is_flagged())
    }

    /// Whether every safe cell has been revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.mine || cell.is_revealed())
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
